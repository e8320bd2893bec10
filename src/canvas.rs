use std::io::Cursor;

use egui::{Color32, ColorImage, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::PaintResult;

/// Something strokes can be painted onto
pub trait Surface {
    /// Size in pixels as `[width, height]`
    fn size(&self) -> [usize; 2];

    /// Paint the whole drawable area with `color`
    fn fill(&mut self, color: Color32);

    /// Paint a round-capped line segment of the given width
    fn line_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
}

/// CPU raster the drawing lives in.
///
/// Painting is not antialiased, so the same sequence of segments always
/// produces the same pixels no matter how it was split across frames.
#[derive(Clone)]
pub struct Canvas {
    pixels: RgbaImage,
    version: u64,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("version", &self.version)
            .finish()
    }
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: RgbaImage::new(width as u32, height as u32),
            version: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width() as usize
    }

    pub fn height(&self) -> usize {
        self.pixels.height() as usize
    }

    pub fn size_matches(&self, size: [usize; 2]) -> bool {
        self.width() == size[0] && self.height() == size[1]
    }

    /// Colour at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x < self.width() && y < self.height() {
            let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x as u32, y as u32);
            Some(Color32::from_rgba_unmultiplied(r, g, b, a))
        } else {
            None
        }
    }

    /// Bumped on every change, used to know when the texture is stale
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn raw_pixels(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied([self.width(), self.height()], self.pixels.as_raw())
    }

    pub fn encode_png(&self) -> PaintResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// Distance from `p` to the segment `a`..`b`
fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Canvas {
    fn size(&self) -> [usize; 2] {
        [self.width(), self.height()]
    }

    fn fill(&mut self, color: Color32) {
        let rgba = to_rgba(color);
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
        self.version += 1;
    }

    fn line_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let (w, h) = (self.width() as f32, self.height() as f32);

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(w);
        let max_y = (from.y.max(to.y) + radius).ceil().min(h);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let rgba = to_rgba(color);
        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.pixels.put_pixel(x, y, rgba);
                }
            }
        }
        self.version += 1;
    }
}
