use egui::{Color32, Pos2};

use crate::glyph::{LabelShape, STAMP_SIZE};
use crate::surface::Surface;

/// A decorative label placed in a single click
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    anchor: Pos2,
    glyph: String,
    rotation: f32,
}

impl Stamp {
    pub fn new(anchor: Pos2, glyph: impl Into<String>, rotation: f32) -> Self {
        Self {
            anchor,
            glyph: glyph.into(),
            rotation,
        }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Rotation in degrees, clockwise
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Move the stamp to a new anchor. The default interaction never drags
    /// stamps, but hosts may.
    pub fn reposition(&mut self, anchor: Pos2) {
        self.anchor = anchor;
    }

    pub fn render(&self, surface: &mut Surface, ink: Color32) {
        draw_label(surface, &self.glyph, self.anchor, self.rotation, ink);
    }
}

/// Draw `label` centred on `anchor`, rotated about it
pub(crate) fn draw_label(surface: &mut Surface, label: &str, anchor: Pos2, rotation: f32, color: Color32) {
    if let Some(shape) = LabelShape::for_label(label, STAMP_SIZE) {
        surface.fill_label(&shape, anchor, rotation, color);
    }
}
