use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::{DEFAULT_EXPORT_SCALE, MAX_EXPORT_SIDE, export_size};
use crate::tools::{MarkerTool, StampChoice};

/// Largest on-screen canvas side, in logical units
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// A named marker thickness offered in the tool panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPreset {
    pub label: String,
    pub thickness: f32,
}

/// Sketchpad settings, usually read from a JSON file.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub export_scale: f32,
    /// RGBA, unmultiplied
    pub background: [u8; 4],
    /// Color of strokes and stamps that have none of their own
    pub ink: [u8; 3],
    pub markers: Vec<MarkerPreset>,
    pub stamps: Vec<String>,
    /// Where the front-end writes exported PNGs
    pub export_path: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            export_scale: DEFAULT_EXPORT_SCALE,
            background: [255, 255, 255, 255],
            ink: [0, 0, 0],
            markers: vec![
                MarkerPreset {
                    label: "Thin".to_owned(),
                    thickness: 2.0,
                },
                MarkerPreset {
                    label: "Thick".to_owned(),
                    thickness: 6.0,
                },
            ],
            stamps: vec!["★".to_owned(), "♥".to_owned(), "☺".to_owned()],
            export_path: PathBuf::from("sketchpad.png"),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading sketch config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the drawing core cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.canvas_width > MAX_CANVAS_SIDE || self.canvas_height > MAX_CANVAS_SIDE {
            return Err(ConfigError::CanvasTooLarge {
                width: self.canvas_width,
                height: self.canvas_height,
                max: MAX_CANVAS_SIDE,
            });
        }
        if !self.export_scale.is_finite() || self.export_scale <= 0.0 {
            return Err(ConfigError::InvalidExportScale(self.export_scale));
        }
        let (width, height) = export_size(self.canvas_width, self.canvas_height, self.export_scale);
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidExportScale(self.export_scale));
        }
        if width > MAX_EXPORT_SIDE as u64 || height > MAX_EXPORT_SIDE as u64 {
            return Err(ConfigError::ExportTooLarge {
                width,
                height,
                max: MAX_EXPORT_SIDE,
            });
        }
        if self.markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        self.marker_tools()?;
        self.stamp_choices()?;
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn ink_color(&self) -> Color32 {
        let [r, g, b] = self.ink;
        Color32::from_rgb(r, g, b)
    }

    /// Marker presets as validated tools, in configuration order
    pub fn marker_tools(&self) -> Result<Vec<(String, MarkerTool)>, ConfigError> {
        self.markers
            .iter()
            .map(|preset| Ok((preset.label.clone(), MarkerTool::new(preset.thickness, None)?)))
            .collect()
    }

    pub fn stamp_choices(&self) -> Result<Vec<StampChoice>, ConfigError> {
        self.stamps.iter().map(|label| StampChoice::new(label.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_width, 256);
        assert_eq!(config.export_scale, 4.0);
        assert_eq!(config.marker_tools().unwrap().len(), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SketchConfig::from_json(r#"{ "canvas_width": 128, "stamps": ["OK"] }"#).unwrap();
        assert_eq!(config.canvas_width, 128);
        assert_eq!(config.canvas_height, 256);
        assert_eq!(config.stamps, vec!["OK".to_owned()]);
    }

    #[test]
    fn test_negative_thickness_is_rejected() {
        let err = SketchConfig::from_json(r#"{ "markers": [{ "label": "Bad", "thickness": -1.0 }] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThickness(t) if t == -1.0));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero_scale = SketchConfig {
            export_scale: 0.0,
            ..SketchConfig::default()
        };
        assert!(matches!(zero_scale.validate(), Err(ConfigError::InvalidExportScale(_))));

        let no_canvas = SketchConfig {
            canvas_width: 0,
            ..SketchConfig::default()
        };
        assert!(matches!(no_canvas.validate(), Err(ConfigError::InvalidCanvasSize { .. })));

        let blank_stamp = SketchConfig {
            stamps: vec![" ".to_owned()],
            ..SketchConfig::default()
        };
        assert!(matches!(blank_stamp.validate(), Err(ConfigError::EmptyStampLabel)));

        let no_markers = SketchConfig {
            markers: Vec::new(),
            ..SketchConfig::default()
        };
        assert!(matches!(no_markers.validate(), Err(ConfigError::NoMarkers)));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let config = SketchConfig {
            canvas_width: MAX_CANVAS_SIDE + 1,
            export_scale: 1.0,
            ..SketchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CanvasTooLarge { width, .. }) if width == MAX_CANVAS_SIDE + 1
        ));

        let largest = SketchConfig {
            canvas_width: MAX_CANVAS_SIDE,
            canvas_height: MAX_CANVAS_SIDE,
            export_scale: 4.0,
            ..SketchConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_oversized_export_is_rejected() {
        assert!(matches!(
            SketchConfig::from_json(r#"{ "export_scale": 1e9 }"#),
            Err(ConfigError::ExportTooLarge { max: MAX_EXPORT_SIDE, .. })
        ));
        assert!(matches!(
            SketchConfig::from_json(r#"{ "export_scale": 64.5 }"#),
            Err(ConfigError::ExportTooLarge { width: 16512, .. })
        ));
        assert!(SketchConfig::from_json(r#"{ "export_scale": 64.0 }"#).is_ok());
    }

    #[test]
    fn test_export_scale_that_rounds_to_nothing_is_rejected() {
        assert!(matches!(
            SketchConfig::from_json(r#"{ "export_scale": 0.001 }"#),
            Err(ConfigError::InvalidExportScale(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(SketchConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SketchConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SketchConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SketchConfig::load("/nonexistent/sketchpad.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
