use egui::{Color32, Pos2};

use crate::surface::Surface;

/// A freehand marker line.
///
/// Points are only appended while the stroke is the in-progress action;
/// once committed to the history it is never mutated again.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    thickness: f32,
    color: Option<Color32>,
}

impl Stroke {
    /// Start a stroke at `start`
    pub fn new(start: Pos2, thickness: f32, color: Option<Color32>) -> Self {
        Self {
            points: vec![start],
            thickness,
            color,
        }
    }

    /// Build a stroke from an existing list of points. A stroke always has a
    /// starting point, so an empty list gives `None`.
    pub fn from_points(points: Vec<Pos2>, thickness: f32, color: Option<Color32>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            thickness,
            color,
        })
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Option<Color32> {
        self.color
    }

    /// Trace the polyline through all points. A stroke with fewer than two
    /// points paints nothing.
    pub fn render(&self, surface: &mut Surface, ink: Color32) {
        if self.points.len() < 2 {
            return;
        }
        surface.stroke_polyline(&self.points, self.thickness, self.color.unwrap_or(ink));
    }
}
