// src/renderer.rs
use egui::{Color32, Pos2, Rect, TextureHandle, TextureOptions};

use crate::canvas::{Canvas, Surface};
use crate::stroke::{Point, StrokeEvent};

/// Paint the whole surface with the background colour
pub fn fill_background(surface: &mut impl Surface, color: Color32) {
    surface.fill(color);
}

/// Draw one round-capped segment right away
pub fn stroke_segment(surface: &mut impl Surface, from: Pos2, to: Pos2, width: f32, color: Color32) {
    surface.line_segment(from, to, width, color);
}

/// Draw the segment from `prev` into `cur`.
///
/// Width and colour come from the destination point, so a size change in the
/// middle of a stroke shows up from the segment leading into the new point.
/// Live drawing and replay both go through here.
pub fn connect(surface: &mut impl Surface, prev: &Point, cur: &Point, background: Color32) {
    stroke_segment(surface, prev.pos, cur.pos, cur.size, cur.effective_color(background));
}

/// Redraw every recorded segment, in order. Pairs touching a gap draw nothing.
///
/// Returns the number of segments drawn.
pub fn replay(surface: &mut impl Surface, events: &[StrokeEvent], background: Color32) -> usize {
    let mut drawn = 0;
    for pair in events.windows(2) {
        if let (StrokeEvent::Point(prev), StrokeEvent::Point(cur)) = (&pair[0], &pair[1]) {
            connect(surface, prev, cur, background);
            drawn += 1;
        }
    }
    drawn
}

/// Fill with the background, then replay everything on top
pub fn redraw(surface: &mut impl Surface, events: &[StrokeEvent], background: Color32) -> usize {
    fill_background(surface, background);
    let drawn = replay(surface, events, background);
    log::debug!("Replayed {} segments from {} entries", drawn, events.len());
    drawn
}

/// Shows the canvas raster on screen through an egui texture
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_version", &self.uploaded_version)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the canvas if it changed since the last upload
    pub fn sync(&mut self, ctx: &egui::Context, canvas: &Canvas) {
        if self.uploaded_version == Some(canvas.version()) && self.texture.is_some() {
            return;
        }

        let image = canvas.to_color_image();
        match &mut self.texture {
            Some(texture) if texture.size() == image.size => {
                texture.set(image, TextureOptions::NEAREST);
            }
            _ => {
                self.texture = Some(ctx.load_texture("paint_canvas", image, TextureOptions::NEAREST));
            }
        }
        self.uploaded_version = Some(canvas.version());
    }

    /// Paint the last uploaded canvas into `rect`
    pub fn render(&self, painter: &egui::Painter, rect: Rect) {
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    /// Forget the texture, e.g. after the canvas was recreated
    pub fn invalidate(&mut self) {
        self.uploaded_version = None;
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}
