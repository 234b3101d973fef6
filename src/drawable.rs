use egui::Color32;

use crate::stamp::Stamp;
use crate::stroke::Stroke;
use crate::surface::Surface;

/// A unit of visible drawing content held by the history log
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    Stamp(Stamp),
}

impl Drawable {
    /// Paint this drawable. `ink` is used when the drawable has no color of its own.
    pub fn render(&self, surface: &mut Surface, ink: Color32) {
        match self {
            Self::Stroke(stroke) => stroke.render(surface, ink),
            Self::Stamp(stamp) => stamp.render(surface, ink),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stroke(_) => "stroke",
            Self::Stamp(_) => "stamp",
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub fn as_stamp(&self) -> Option<&Stamp> {
        match self {
            Self::Stamp(stamp) => Some(stamp),
            _ => None,
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Self::Stroke(stroke)
    }
}

impl From<Stamp> for Drawable {
    fn from(stamp: Stamp) -> Self {
        Self::Stamp(stamp)
    }
}
