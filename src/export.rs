#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::PaintResult;

/// Receives an encoded image and delivers it to the user as a file
pub trait ImageSink {
    fn deliver(&mut self, png: &[u8], filename: &str) -> PaintResult<()>;
}

/// Encode the canvas as PNG and hand it to `sink`
pub fn export_image(canvas: &Canvas, sink: &mut dyn ImageSink, filename: &str) -> PaintResult<()> {
    let png = canvas.encode_png()?;
    log::info!("Exporting {} ({} bytes)", filename, png.len());
    sink.deliver(&png, filename)
}

/// Writes exported images into a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ImageSink for FileSink {
    /// `filename` must be a bare file name; anything with a directory part
    /// would land outside `dir` and is refused.
    fn deliver(&mut self, png: &[u8], filename: &str) -> PaintResult<()> {
        if Path::new(filename).file_name() != Some(std::ffi::OsStr::new(filename)) {
            return Err(crate::error::PaintError::Export(format!(
                "{:?} is not a plain file name",
                filename
            )));
        }
        std::fs::create_dir_all(&self.dir).map_err(export_error)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, png).map_err(export_error)?;
        log::info!("Image written to {}", path.display());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_error(err: std::io::Error) -> crate::error::PaintError {
    crate::error::PaintError::Export(err.to_string())
}

/// How long the object URL outlives the click that starts the download
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 10_000;

/// Triggers the browser's save-as through an `<a download>` link
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl ImageSink for BrowserDownload {
    fn deliver(&mut self, png: &[u8], filename: &str) -> PaintResult<()> {
        use wasm_bindgen::JsCast as _;

        let js_error = |err: wasm_bindgen::JsValue| crate::error::PaintError::Export(format!("{:?}", err));

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(png));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| crate::error::PaintError::Export("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| crate::error::PaintError::Export("no document".to_owned()))?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| crate::error::PaintError::Export("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        // Firefox and Safari may still be reading the blob after click() returns
        let revoke = wasm_bindgen::closure::Closure::once_into_js(move || {
            if let Err(err) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("Failed to revoke download URL: {:?}", err);
            }
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
            .map_err(js_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Surface;
    use egui::Color32;

    #[derive(Default)]
    struct CapturingSink {
        delivered: Vec<(String, usize)>,
    }

    impl ImageSink for CapturingSink {
        fn deliver(&mut self, png: &[u8], filename: &str) -> PaintResult<()> {
            self.delivered.push((filename.to_owned(), png.len()));
            Ok(())
        }
    }

    #[test]
    fn test_export_hands_png_to_sink() {
        let mut canvas = Canvas::new(16, 16);
        canvas.fill(Color32::WHITE);
        let mut sink = CapturingSink::default();

        export_image(&canvas, &mut sink, "my-drawing.png").unwrap();

        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(sink.delivered[0].0, "my-drawing.png");
        assert!(sink.delivered[0].1 > 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("paint_canvas_export_{}", std::process::id()));
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Color32::BLACK);

        export_image(&canvas, &mut FileSink::new(&dir), "out.png").unwrap();

        let decoded = image::open(dir.join("out.png")).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_sink_refuses_paths_outside_its_dir() {
        let root = std::env::temp_dir().join(format!("paint_canvas_escape_{}", std::process::id()));
        let dir = root.join("downloads");
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Color32::BLACK);
        let mut sink = FileSink::new(&dir);

        for filename in ["../escaped.png", "nested/out.png", "..", ""] {
            let err = export_image(&canvas, &mut sink, filename).unwrap_err();
            assert!(matches!(err, crate::error::PaintError::Export(_)), "{filename:?}");
        }
        let absolute = root.join("absolute.png");
        assert!(export_image(&canvas, &mut sink, &absolute.to_string_lossy()).is_err());

        assert!(!root.join("escaped.png").exists());
        assert!(!absolute.exists());

        let _ = std::fs::remove_dir_all(&root);
    }
}
