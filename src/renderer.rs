use egui::Color32;

use crate::drawable::Drawable;
use crate::preview::Preview;
use crate::stroke::Stroke;
use crate::surface::Surface;

/// Everything visible at one instant
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame<'a> {
    /// Committed drawables, oldest first
    pub committed: &'a [Drawable],
    pub in_progress: Option<&'a Stroke>,
    /// Ignored while a stroke is in progress
    pub preview: Option<&'a Preview>,
}

/// Repaints a surface from scratch.
///
/// `repaint` depends only on its inputs: painting the same frame twice yields
/// identical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    background: Color32,
    ink: Color32,
    preview_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            ink: Color32::BLACK,
            preview_color: Color32::GRAY,
        }
    }
}

impl Renderer {
    pub fn new(background: Color32, ink: Color32) -> Self {
        Self {
            background,
            ink,
            ..Self::default()
        }
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn ink(&self) -> Color32 {
        self.ink
    }

    /// Clear, then paint committed drawables in commit order, then the
    /// in-progress stroke, then the preview when nothing is in progress.
    pub fn repaint(&self, surface: &mut Surface, frame: &Frame<'_>) {
        surface.clear(self.background);

        for drawable in frame.committed {
            drawable.render(surface, self.ink);
        }

        match (frame.in_progress, frame.preview) {
            (Some(stroke), _) => stroke.render(surface, self.ink),
            (None, Some(preview)) => preview.render(surface, self.preview_color),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use egui::pos2;

    fn line(y: f32, color: Option<Color32>) -> Drawable {
        Drawable::Stroke(Stroke::from_points(
            vec![pos2(0.0, y), pos2(20.0, y)],
            4.0,
            color,
        )
        .unwrap())
    }

    #[test]
    fn test_repaint_is_idempotent() {
        let renderer = Renderer::default();
        let committed = vec![line(5.0, None), Drawable::Stamp(Stamp::new(pos2(10.0, 12.0), "★", 33.0))];
        let preview = Preview::Marker {
            position: pos2(15.0, 15.0),
            thickness: 6.0,
        };
        let frame = Frame {
            committed: &committed,
            in_progress: None,
            preview: Some(&preview),
        };

        let mut surface = Surface::new(20, 20).unwrap();
        renderer.repaint(&mut surface, &frame);
        let first = surface.data().to_vec();
        renderer.repaint(&mut surface, &frame);
        assert_eq!(first, surface.data());
    }

    #[test]
    fn test_later_commits_paint_over_earlier() {
        let renderer = Renderer::default();
        let committed = vec![line(10.0, Some(Color32::RED)), line(10.0, Some(Color32::BLUE))];
        let mut surface = Surface::new(20, 20).unwrap();
        renderer.repaint(
            &mut surface,
            &Frame {
                committed: &committed,
                ..Frame::default()
            },
        );
        assert_eq!(surface.pixel(10, 10), Some(Color32::BLUE));
    }

    #[test]
    fn test_preview_hidden_while_stroke_in_progress() {
        let renderer = Renderer::default();
        let preview = Preview::Marker {
            position: pos2(10.0, 10.0),
            thickness: 10.0,
        };
        let stroke = Stroke::new(pos2(1.0, 1.0), 1.0, None);

        let mut surface = Surface::new(20, 20).unwrap();
        renderer.repaint(
            &mut surface,
            &Frame {
                committed: &[],
                in_progress: Some(&stroke),
                preview: Some(&preview),
            },
        );
        // Single-point stroke draws nothing and the preview is suppressed
        assert_eq!(surface.painted_bounds(Color32::WHITE), None);
    }

    #[test]
    fn test_clear_wipes_previous_frame() {
        let renderer = Renderer::default();
        let committed = vec![line(10.0, None)];
        let mut surface = Surface::new(20, 20).unwrap();
        renderer.repaint(
            &mut surface,
            &Frame {
                committed: &committed,
                ..Frame::default()
            },
        );
        assert!(surface.painted_bounds(Color32::WHITE).is_some());

        renderer.repaint(&mut surface, &Frame::default());
        assert_eq!(surface.painted_bounds(Color32::WHITE), None);
    }
}
