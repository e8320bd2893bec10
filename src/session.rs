//! The paint session owns everything a drawing needs: the recorded strokes,
//! the tool state, the background colour, the pointer state machine, the
//! status label and the raster those are drawn into.
//!
//! All mutation goes through `PaintSession` methods, which run one at a time
//! on the UI thread. Failures never escape as panics: each action ends with
//! a status message, and storage failures are also returned to the caller.

use egui::{Color32, Pos2};

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::PaintResult;
use crate::export::{self, ImageSink};
use crate::input::InputEvent;
use crate::persistence::StrokePersistence;
use crate::renderer;
use crate::state::EditorState;
use crate::status::StatusLabel;
use crate::stroke::{StrokeEvent, StrokeStore};
use crate::tools::{self, ToolControls, ToolKind, ToolState};

pub const MSG_CANVAS_CLEARED: &str = "Canvas Cleared";
pub const MSG_CANVAS_SAVED: &str = "Canvas Saved";
pub const MSG_CANVAS_LOADED: &str = "Canvas Loaded";
pub const MSG_NOTHING_TO_LOAD: &str = "No Canvas to Load";
pub const MSG_STORAGE_CLEARED: &str = "Local Storage Cleared";
pub const MSG_IMAGE_SAVED: &str = "Image File Saved";
pub const MSG_STORAGE_UNAVAILABLE: &str = "Storage Unavailable";
pub const MSG_EXPORT_FAILED: &str = "Image Export Failed";

/// What happened when loading from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored sequence replaced the current one
    Loaded { entries: usize },
    /// Nothing usable was stored; the current sequence is unchanged
    NothingToLoad,
}

#[derive(Debug)]
pub struct PaintSession {
    config: CanvasConfig,
    store: StrokeStore,
    controls: ToolControls,
    tool: ToolState,
    background: Color32,
    state: EditorState,
    status: StatusLabel,
    canvas: Canvas,
}

impl PaintSession {
    /// Start with an empty drawing on a freshly filled surface
    pub fn new(config: CanvasConfig, controls: ToolControls, size: [usize; 2]) -> Self {
        let tool = ToolState::brush(controls.brush_color, config.brush_size);
        let status = StatusLabel::new(ToolKind::Brush.name(), config.status_delay_secs());
        let background = controls.bucket_color;
        let mut canvas = Canvas::new(size[0], size[1]);
        renderer::fill_background(&mut canvas, background);

        // every run starts at the default brush size
        let mut controls = controls;
        controls.size = config.brush_size;

        Self {
            config,
            store: StrokeStore::new(),
            controls,
            tool,
            background,
            state: EditorState::Idle,
            status,
            canvas,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.store
    }

    pub fn controls(&self) -> &ToolControls {
        &self.controls
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Seconds until the status label changes by itself
    pub fn time_until_status_revert(&self, now: f64) -> Option<f64> {
        self.status.time_until_revert(now)
    }

    // ---- pointer state machine ----

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { location } => self.pointer_down(location.position),
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => self.pointer_up(),
        }
    }

    /// Start a stroke at `pos`. The press position itself is not recorded;
    /// the stroke's first point comes with the first move.
    pub fn pointer_down(&mut self, pos: Pos2) {
        log::trace!("Stroke started at {:?}", pos);
        // keep the new stroke from joining the previous one on replay
        if matches!(self.store.last(), Some(StrokeEvent::Point(_))) {
            self.store.append(StrokeEvent::Gap);
        }
        self.state.begin_painting();
    }

    /// Record `pos`. While painting this also draws the segment from the
    /// previous point of the stroke; while idle it records a gap.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.state.is_painting() {
            self.store.append(StrokeEvent::Gap);
            return;
        }

        let point = self.tool.point_at(pos);
        if let Some(prev) = self.state.advance(point) {
            renderer::connect(&mut self.canvas, &prev, &point, self.background);
        }
        self.store.append(point);
    }

    pub fn pointer_up(&mut self) {
        self.state.return_to_idle();
    }

    // ---- tool selection ----

    pub fn select_brush(&mut self) {
        self.tool = ToolState::brush(self.controls.brush_color, self.config.brush_size);
        self.controls.size = self.config.brush_size;
        self.status.set_resting(ToolKind::Brush.name());
        log::info!("Brush selected");
    }

    pub fn select_eraser(&mut self) {
        self.tool = ToolState {
            kind: ToolKind::Eraser,
            color: self.background,
            size: self.config.eraser_size,
        };
        // messages revert to "Eraser" here rather than the brush text, so the
        // label never names a tool that is not active
        self.status.set_resting(ToolKind::Eraser.name());
        log::info!("Eraser selected");
    }

    /// Picking a brush colour also leaves eraser mode
    pub fn set_brush_color(&mut self, color: Color32) {
        self.controls.brush_color = color;
        self.tool.color = color;
        self.tool.kind = ToolKind::Brush;
    }

    pub fn set_brush_size(&mut self, size: f32) {
        let size = tools::clamp_size(size);
        self.controls.size = size;
        self.tool.size = size;
    }

    /// Change the background and redraw everything on top of it
    pub fn set_bucket_color(&mut self, color: Color32) {
        self.controls.bucket_color = color;
        self.background = color;
        self.redraw();
    }

    // ---- whole-drawing actions ----

    pub fn clear_canvas(&mut self, now: f64) {
        self.store.clear();
        renderer::fill_background(&mut self.canvas, self.background);
        self.status.flash(MSG_CANVAS_CLEARED, now);
        log::info!("Canvas cleared");
    }

    /// Recreate the surface at a new size and repaint it.
    /// Returns false if the size did not change.
    pub fn resize(&mut self, size: [usize; 2]) -> bool {
        if self.canvas.size_matches(size) {
            return false;
        }
        log::debug!("Resizing canvas to {}x{}", size[0], size[1]);
        self.canvas = Canvas::new(size[0], size[1]);
        self.redraw();
        true
    }

    fn redraw(&mut self) {
        renderer::redraw(&mut self.canvas, self.store.events(), self.background);
    }

    pub fn save(&mut self, persistence: &mut StrokePersistence, now: f64) -> PaintResult<()> {
        let result = self
            .store
            .serialize()
            .and_then(|serialized| persistence.save(&serialized));
        match &result {
            Ok(()) => {
                log::info!("Saved {} stroke entries under {:?}", self.store.len(), persistence.key());
                self.status.flash(MSG_CANVAS_SAVED, now);
            }
            Err(err) => {
                log::warn!("Save failed: {}", err);
                self.status.flash(MSG_STORAGE_UNAVAILABLE, now);
            }
        }
        result
    }

    /// Replace the drawing with the stored one.
    ///
    /// Absent or unreadable data is reported as `NothingToLoad`; only storage
    /// failures come back as errors.
    pub fn load(&mut self, persistence: &StrokePersistence, now: f64) -> PaintResult<LoadOutcome> {
        let stored = match persistence.load() {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("Load failed: {}", err);
                self.status.flash(MSG_STORAGE_UNAVAILABLE, now);
                return Err(err);
            }
        };

        let Some(text) = stored else {
            self.status.flash(MSG_NOTHING_TO_LOAD, now);
            return Ok(LoadOutcome::NothingToLoad);
        };

        match self.store.deserialize(&text) {
            Ok(()) => {
                self.redraw();
                self.status.flash(MSG_CANVAS_LOADED, now);
                log::info!("Loaded {} stroke entries", self.store.len());
                Ok(LoadOutcome::Loaded {
                    entries: self.store.len(),
                })
            }
            Err(err) => {
                log::warn!("Ignoring stored drawing: {}", err);
                self.status.flash(MSG_NOTHING_TO_LOAD, now);
                Ok(LoadOutcome::NothingToLoad)
            }
        }
    }

    pub fn clear_storage(&mut self, persistence: &mut StrokePersistence, now: f64) -> PaintResult<()> {
        let result = persistence.clear_stored();
        match &result {
            Ok(()) => {
                log::info!("Cleared stored drawing {:?}", persistence.key());
                self.status.flash(MSG_STORAGE_CLEARED, now);
            }
            Err(err) => {
                log::warn!("Clearing storage failed: {}", err);
                self.status.flash(MSG_STORAGE_UNAVAILABLE, now);
            }
        }
        result
    }

    /// Export the surface as PNG. `filename` defaults to the configured one.
    pub fn export(&mut self, sink: &mut dyn ImageSink, filename: Option<&str>, now: f64) -> PaintResult<()> {
        let filename = filename.unwrap_or(&self.config.export_filename).to_owned();
        let result = export::export_image(&self.canvas, sink, &filename);
        match &result {
            Ok(()) => {
                self.status.flash(MSG_IMAGE_SAVED, now);
            }
            Err(err) => {
                log::warn!("Export failed: {}", err);
                self.status.flash(MSG_EXPORT_FAILED, now);
            }
        }
        result
    }

    /// Advance timers. Returns whether the status label changed.
    pub fn tick(&mut self, now: f64) -> bool {
        self.status.tick(now)
    }
}
