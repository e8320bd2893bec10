use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PaintResult;

/// Environment variable naming a JSON file that overrides the defaults (native only)
pub const CONFIG_ENV_VAR: &str = "PAINT_CANVAS_CONFIG";

/// Fixed settings for a paint session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Key the stroke sequence is saved under
    pub storage_key: String,
    /// How long a status message stays up before the tool name returns
    pub status_delay_ms: u64,
    /// Height reserved above the drawing surface for the controls
    pub header_height: f32,
    pub brush_size: f32,
    pub eraser_size: f32,
    #[serde(with = "crate::color::serde_hex")]
    pub brush_color: Color32,
    #[serde(with = "crate::color::serde_hex")]
    pub bucket_color: Color32,
    pub export_filename: String,
    /// Where saved strokes and exported images go on native builds
    pub data_dir: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            storage_key: "drawnArray".to_owned(),
            status_delay_ms: 1500,
            header_height: 50.0,
            brush_size: 10.0,
            eraser_size: 50.0,
            brush_color: Color32::from_rgb(0xA5, 0x1D, 0xAB),
            bucket_color: Color32::WHITE,
            export_filename: "my-drawing.png".to_owned(),
            data_dir: "paint_data".to_owned(),
        }
    }
}

impl CanvasConfig {
    pub fn from_json(text: &str) -> PaintResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Status delay in seconds
    pub fn status_delay_secs(&self) -> f64 {
        self.status_delay_ms as f64 / 1000.0
    }

    /// Read the config file at `path`, falling back to defaults if it is
    /// missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_json(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Defaults, overridden by the file named in `PAINT_CANVAS_CONFIG` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CanvasConfig::from_json(r##"{"storage_key": "sketch", "bucket_color": "#000000"}"##).unwrap();
        assert_eq!(config.storage_key, "sketch");
        assert_eq!(config.bucket_color, Color32::BLACK);
        assert_eq!(config.status_delay_ms, 1500);
        assert_eq!(config.export_filename, "my-drawing.png");
    }

    #[test]
    fn test_bad_colour_is_malformed() {
        let err = CanvasConfig::from_json(r#"{"brush_color": "nope"}"#).unwrap_err();
        assert!(matches!(err, crate::error::PaintError::MalformedData(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = CanvasConfig::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(config, CanvasConfig::default());
    }
}
