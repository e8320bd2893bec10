use std::time::Duration;

use crate::config::CanvasConfig;
use crate::export::ImageSink;
use crate::input::InputHandler;
use crate::panels::{central_panel, header_panel};
use crate::persistence::StrokePersistence;
use crate::renderer::Renderer;
use crate::session::PaintSession;
use crate::tools::ToolControls;
use crate::util::time;

pub struct PaintApp {
    session: PaintSession,
    renderer: Renderer,
    input: InputHandler,
    persistence: StrokePersistence,
    sink: Box<dyn ImageSink>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        // Restore the header controls from the last run, if any
        let controls = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolControls>(storage, eframe::APP_KEY))
            .unwrap_or_else(|| ToolControls::from_config(&config));

        let persistence = StrokePersistence::platform(&config);
        let sink = platform_sink(&config);
        Self::with_backends(config, controls, persistence, sink)
    }

    pub fn with_backends(
        config: CanvasConfig,
        controls: ToolControls,
        persistence: StrokePersistence,
        sink: Box<dyn ImageSink>,
    ) -> Self {
        Self {
            // sized for real on the first frame
            session: PaintSession::new(config, controls, [1, 1]),
            renderer: Renderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            persistence,
            sink,
        }
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PaintSession {
        &mut self.session
    }

    /// Keep the surface matching the area it is shown in
    pub fn set_canvas_rect(&mut self, rect: egui::Rect) {
        self.input.set_canvas_rect(rect);
        let size = [
            rect.width().round().max(1.0) as usize,
            rect.height().round().max(1.0) as usize,
        ];
        if self.session.resize(size) {
            self.renderer.invalidate();
        }
    }

    /// Feed this frame's pointer input to the session. Only input that reaches
    /// `canvas_layer` counts.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_layer: egui::LayerId) {
        for event in self.input.process_input(ctx, canvas_layer) {
            self.session.handle_input(event);
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.sync(ctx, self.session.canvas());
        self.renderer.render(painter, rect);
    }

    pub fn save(&mut self) {
        // failures already show up in the status label
        let _ = self.session.save(&mut self.persistence, time::now_secs());
    }

    pub fn load(&mut self) {
        let _ = self.session.load(&self.persistence, time::now_secs());
    }

    pub fn clear_storage(&mut self) {
        let _ = self.session.clear_storage(&mut self.persistence, time::now_secs());
    }

    pub fn download(&mut self) {
        let _ = self.session.export(self.sink.as_mut(), None, time::now_secs());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_sink(config: &CanvasConfig) -> Box<dyn ImageSink> {
    Box::new(crate::export::FileSink::new(&config.data_dir))
}

#[cfg(target_arch = "wasm32")]
fn platform_sink(_config: &CanvasConfig) -> Box<dyn ImageSink> {
    Box::new(crate::export::BrowserDownload)
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.session.controls());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = time::now_secs();
        self.session.tick(now);

        header_panel(self, ctx);
        central_panel(self, ctx);

        // wake up again when the status message is due to revert
        if let Some(wait) = self.session.time_until_status_revert(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(wait));
        }
    }
}
