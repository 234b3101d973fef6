//! The drawing session state machine.
//!
//! ```text
//!            pointer down (marker)
//!   ┌──────┐ ───────────────────────► ┌─────────┐
//!   │ Idle │                          │ Drawing │ ◄─┐ pointer move
//!   └──────┘ ◄─────────────────────── └─────────┘ ──┘ (append point)
//!      ▲ │    pointer up   → commit
//!      │ │    pointer leave → discard
//!      └─┘
//!   pointer down (stamp) → commit stamp, stay Idle
//!   pointer move         → refresh preview
//! ```
//!
//! Every input is handled to completion before the next one; notifications are
//! queued on the [`EventBus`] in the order they were raised.

use egui::Pos2;

use crate::drawable::Drawable;
use crate::event::{EventBus, SketchEvent};
use crate::history::HistoryLog;
use crate::input::InputEvent;
use crate::preview::Preview;
use crate::stamp::Stamp;
use crate::stroke::Stroke;
use crate::tools::{ActiveTool, MarkerTool, RotationSampler, StampChoice, StampTool};

/// Where the controller is in the pointer interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    /// A marker stroke is under construction
    Drawing { stroke: Stroke },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
        }
    }
}

/// Turns pointer and tool input into history mutations.
///
/// Owns all mutable drawing state: the history log, the in-progress stroke,
/// the active tool and its preview.
#[derive(Debug, Default)]
pub struct SessionController {
    history: HistoryLog,
    state: SessionState,
    tool: ActiveTool,
    preview: Option<Preview>,
    /// Last position the pointer was seen over the canvas
    pointer: Option<Pos2>,
    rotation: RotationSampler,
    bus: EventBus,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `sampler` for the rotation of subsequently selected stamp tools
    pub fn with_rotation_sampler(mut self, sampler: RotationSampler) -> Self {
        self.rotation = sampler;
        self
    }

    /// Start with `marker` selected instead of the default one
    pub fn with_marker(mut self, marker: MarkerTool) -> Self {
        self.tool = ActiveTool::Marker(marker);
        self
    }

    /// Dispatch one input. Export requests are not the controller's concern and are only logged.
    pub fn handle(&mut self, input: InputEvent) {
        match input {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::SelectMarker(marker) => self.select_marker_tool(marker),
            InputEvent::SelectStamp(choice) => self.select_stamp_tool(choice),
            InputEvent::Clear => self.clear(),
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Export => log::debug!("Export is handled by the sketchpad, ignoring"),
        }
    }

    pub fn pointer_down(&mut self, position: Pos2) {
        self.pointer = Some(position);

        if let SessionState::Drawing { .. } = self.state {
            log::debug!("Ignoring pointer down while already drawing");
            return;
        }

        match &self.tool {
            ActiveTool::Marker(marker) => {
                log::debug!("Idle -> Drawing at {position:?}");
                self.state = SessionState::Drawing {
                    stroke: Stroke::new(position, marker.thickness(), marker.color()),
                };
                self.preview = None;
                self.bus.emit(SketchEvent::Changed);
            }
            ActiveTool::Stamp(stamp) => {
                let stamp = Stamp::new(position, stamp.glyph(), stamp.rotation());
                log::info!("Placing stamp {:?} at {position:?}", stamp.glyph());
                self.history.commit(Drawable::Stamp(stamp));
                self.preview = None;
                self.bus.emit(SketchEvent::Changed);
            }
        }
    }

    pub fn pointer_move(&mut self, position: Pos2) {
        self.pointer = Some(position);

        match &mut self.state {
            SessionState::Drawing { stroke } => {
                stroke.add_point(position);
                self.bus.emit(SketchEvent::Changed);
            }
            SessionState::Idle => {
                self.preview = Some(self.tool.preview_at(position));
                self.bus.emit(SketchEvent::ToolMoved);
            }
        }
    }

    /// Commit the in-progress stroke, if any
    pub fn pointer_up(&mut self) {
        if let SessionState::Drawing { stroke } = std::mem::take(&mut self.state) {
            log::info!("Drawing -> Idle, committing stroke of {} points", stroke.points().len());
            self.history.commit(Drawable::Stroke(stroke));
            self.bus.emit(SketchEvent::Changed);
        }
    }

    /// Discard the in-progress stroke without committing it, and hide the preview
    pub fn pointer_leave(&mut self) {
        self.pointer = None;

        match std::mem::take(&mut self.state) {
            SessionState::Drawing { stroke } => {
                log::info!("Drawing -> Idle, discarding stroke of {} points", stroke.points().len());
                self.preview = None;
                self.bus.emit(SketchEvent::Changed);
            }
            SessionState::Idle => {
                if self.preview.take().is_some() {
                    self.bus.emit(SketchEvent::ToolMoved);
                }
            }
        }
    }

    pub fn select_marker_tool(&mut self, marker: MarkerTool) {
        log::info!("Selected marker, thickness {}", marker.thickness());
        self.tool = ActiveTool::Marker(marker);
        self.refresh_preview();
    }

    /// Pick a stamp; its rotation is sampled now and kept until the next selection
    pub fn select_stamp_tool(&mut self, choice: StampChoice) {
        let rotation = self.rotation.sample();
        log::info!("Selected stamp {:?}, rotation {rotation:.1}°", choice.label());
        self.tool = ActiveTool::Stamp(StampTool::new(choice, rotation));
        self.refresh_preview();
    }

    pub fn undo(&mut self) {
        if self.history.undo() {
            self.bus.emit(SketchEvent::Changed);
        } else {
            log::debug!("Nothing to undo");
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            self.bus.emit(SketchEvent::Changed);
        } else {
            log::debug!("Nothing to redo");
        }
    }

    /// Forget every committed and undone drawable. An in-progress stroke survives.
    pub fn clear(&mut self) {
        log::info!("Clearing {} drawables", self.history.snapshot().len());
        self.history.clear();
        self.bus.emit(SketchEvent::Changed);
    }

    fn refresh_preview(&mut self) {
        self.preview = self.pointer.map(|position| self.tool.preview_at(position));
        self.bus.emit(SketchEvent::ToolMoved);
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing { .. })
    }

    /// The stroke under construction, never part of the history snapshot
    pub fn in_progress(&self) -> Option<&Stroke> {
        match &self.state {
            SessionState::Drawing { stroke } => Some(stroke),
            SessionState::Idle => None,
        }
    }

    /// The preview to draw, which only exists while idle
    pub fn preview(&self) -> Option<&Preview> {
        match self.state {
            SessionState::Idle => self.preview.as_ref(),
            SessionState::Drawing { .. } => None,
        }
    }

    pub fn active_tool(&self) -> &ActiveTool {
        &self.tool
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Take the notifications raised since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<SketchEvent> {
        self.bus.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_state_names() {
        let mut session = SessionController::new();
        assert_eq!(session.state().name(), "Idle");
        session.pointer_down(pos2(1.0, 1.0));
        assert_eq!(session.state().name(), "Drawing");
    }

    #[test]
    fn test_pointer_down_while_drawing_is_ignored() {
        let mut session = SessionController::new();
        session.pointer_down(pos2(1.0, 1.0));
        session.take_events();

        session.pointer_down(pos2(9.0, 9.0));
        assert!(session.take_events().is_empty());
        assert_eq!(session.in_progress().unwrap().points(), &[pos2(1.0, 1.0)]);
    }

    #[test]
    fn test_pointer_up_while_idle_is_silent() {
        let mut session = SessionController::new();
        session.pointer_up();
        assert!(session.take_events().is_empty());
        assert!(session.history().snapshot().is_empty());
    }

    #[test]
    fn test_preview_is_hidden_while_drawing() {
        let mut session = SessionController::new();
        session.pointer_move(pos2(5.0, 5.0));
        assert!(session.preview().is_some());

        session.pointer_down(pos2(5.0, 5.0));
        assert!(session.preview().is_none());

        // Selecting a tool mid-stroke leaves the stroke alone
        session.select_marker_tool(MarkerTool::new(9.0, None).unwrap());
        assert_eq!(session.in_progress().unwrap().thickness(), 2.0);
        assert!(session.preview().is_none());
    }

    #[test]
    fn test_placing_a_stamp_removes_its_preview() {
        let mut session = SessionController::new().with_rotation_sampler(RotationSampler::fixed(0.0));
        session.select_stamp_tool(StampChoice::new("★").unwrap());
        session.pointer_move(pos2(50.0, 50.0));
        assert!(session.preview().is_some());

        session.pointer_down(pos2(50.0, 50.0));
        assert!(session.preview().is_none());
        assert_eq!(session.history().snapshot().len(), 1);

        // The next move brings it back
        session.pointer_move(pos2(60.0, 50.0));
        assert_eq!(session.preview().map(Preview::position), Some(pos2(60.0, 50.0)));
    }

    #[test]
    fn test_export_request_changes_nothing() {
        let mut session = SessionController::new();
        session.handle(InputEvent::Export);
        assert!(session.take_events().is_empty());
        assert!(session.history().snapshot().is_empty());
    }
}
