use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::stroke::Point;

/// Smallest and largest size the size slider allows
pub const SIZE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=50.0;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
        }
    }
}

/// What the user picked in the header controls. Persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolControls {
    #[serde(with = "crate::color::serde_hex")]
    pub brush_color: Color32,
    #[serde(with = "crate::color::serde_hex")]
    pub bucket_color: Color32,
    /// Not persisted; each run starts at the configured brush size
    #[serde(skip)]
    pub size: f32,
}

impl Default for ToolControls {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl ToolControls {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            brush_color: config.brush_color,
            bucket_color: config.bucket_color,
            size: config.brush_size,
        }
    }

    /// Slider readout, zero-padded to two digits
    pub fn size_label(&self) -> String {
        format!("{:02}", self.size.round() as u32)
    }
}

/// The parameters every newly recorded point is stamped with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub kind: ToolKind,
    pub color: Color32,
    pub size: f32,
}

impl ToolState {
    pub fn brush(color: Color32, size: f32) -> Self {
        Self {
            kind: ToolKind::Brush,
            color,
            size,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.kind == ToolKind::Eraser
    }

    /// Snapshot the current tool at `pos`
    pub fn point_at(&self, pos: Pos2) -> Point {
        Point::new(pos, self.size, self.color, self.is_eraser())
    }
}

/// Clamp a requested size into the slider range
pub fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        *SIZE_RANGE.start()
    } else {
        size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label_is_padded() {
        let mut controls = ToolControls::default();
        controls.size = 5.0;
        assert_eq!(controls.size_label(), "05");
        controls.size = 42.0;
        assert_eq!(controls.size_label(), "42");
    }

    #[test]
    fn test_point_snapshot() {
        let tool = ToolState {
            kind: ToolKind::Eraser,
            color: Color32::WHITE,
            size: 50.0,
        };
        let point = tool.point_at(Pos2::new(5.0, 5.0));
        assert_eq!(point.size, 50.0);
        assert_eq!(point.color, Color32::WHITE);
        assert!(point.is_eraser);
    }

    #[test]
    fn test_controls_roundtrip_through_json() {
        let controls = ToolControls::default();
        let json = serde_json::to_string(&controls).unwrap();
        assert!(json.contains("\"#A51DAB\""));
        assert!(!json.contains("size"));
        let back: ToolControls = serde_json::from_str(&json).unwrap();
        assert_eq!(back, controls);
    }

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(0.0), 1.0);
        assert_eq!(clamp_size(80.0), 50.0);
        assert_eq!(clamp_size(f32::NAN), 1.0);
    }
}
