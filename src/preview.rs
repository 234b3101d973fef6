use egui::{Color32, Pos2};

use crate::stamp::draw_label;
use crate::surface::Surface;

/// Outline width of the marker cursor, in logical units
const MARKER_OUTLINE: f32 = 1.0;

/// Cursor-following indicator of the selected tool. Never stored in the history.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Hollow circle as wide as the marker line
    Marker { position: Pos2, thickness: f32 },
    /// The stamp that a click would place here
    Stamp {
        position: Pos2,
        glyph: String,
        rotation: f32,
    },
}

impl Preview {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::Marker { position, .. } | Self::Stamp { position, .. } => *position,
        }
    }

    pub fn render(&self, surface: &mut Surface, color: Color32) {
        match self {
            Self::Marker {
                position,
                thickness,
            } => surface.stroke_circle(*position, *thickness, MARKER_OUTLINE, color),
            Self::Stamp {
                position,
                glyph,
                rotation,
            } => draw_label(surface, glyph, *position, *rotation, color),
        }
    }
}
