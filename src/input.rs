use egui::{Context, Key, Modifiers, Pos2, Rect, Vec2, pos2};

use crate::tools::{MarkerTool, StampChoice};

/// Everything the outside world can ask of the sketchpad
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at a canvas position
    PointerDown { position: Pos2 },
    /// Pointer moved over the canvas, with or without the button held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    SelectMarker(MarkerTool),
    SelectStamp(StampChoice),
    Clear,
    Undo,
    Redo,
    /// Render the committed drawing at export scale
    Export,
}

/// Handles converting raw egui input over the canvas widget into [`InputEvent`]s
/// in logical canvas coordinates.
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    logical_size: Vec2,
}

impl InputHandler {
    pub fn new(logical_size: Vec2) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: Rect::from_min_size(Pos2::ZERO, logical_size),
            logical_size,
        }
    }

    /// Update the on-screen rectangle of the canvas (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Map a screen position into canvas coordinates, or `None` if it is off the canvas
    pub fn to_canvas(&self, screen: Pos2) -> Option<Pos2> {
        if !self.canvas_rect.contains(screen) {
            return None;
        }
        let local = screen - self.canvas_rect.min;
        let size = self.canvas_rect.size();
        Some(pos2(
            local.x * self.logical_size.x / size.x,
            local.y * self.logical_size.y / size.y,
        ))
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input_mut(|input| {
            let position = input.pointer.hover_pos().and_then(|pos| self.to_canvas(pos));

            match (position, self.last_pointer_pos) {
                (Some(pos), last) if Some(pos) != last => {
                    events.push(InputEvent::PointerMove { position: pos });
                }
                (None, Some(_)) => events.push(InputEvent::PointerLeave),
                _ => {}
            }
            self.last_pointer_pos = position;

            if input.pointer.primary_pressed() {
                if let Some(pos) = position {
                    events.push(InputEvent::PointerDown { position: pos });
                }
            }
            if input.pointer.primary_released() {
                events.push(InputEvent::PointerUp);
            }

            // Redo shortcuts first: plain Cmd+Z would also match Cmd+Shift+Z
            if input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || input.consume_key(Modifiers::COMMAND, Key::Y)
            {
                events.push(InputEvent::Redo);
            } else if input.consume_key(Modifiers::COMMAND, Key::Z) {
                events.push(InputEvent::Undo);
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_to_canvas_scales_into_logical_units() {
        let mut handler = InputHandler::new(vec2(256.0, 256.0));
        handler.set_canvas_rect(Rect::from_min_size(pos2(100.0, 50.0), vec2(512.0, 512.0)));

        assert_eq!(handler.to_canvas(pos2(100.0, 50.0)), Some(pos2(0.0, 0.0)));
        assert_eq!(handler.to_canvas(pos2(356.0, 306.0)), Some(pos2(128.0, 128.0)));
        assert_eq!(handler.to_canvas(pos2(10.0, 10.0)), None);
    }
}
