use crate::event::{EventHandler, SketchEvent};

/// Asks egui for a new frame whenever the drawing changes
#[derive(Debug, Clone)]
pub struct RepaintRequester {
    ctx: egui::Context,
}

impl RepaintRequester {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl EventHandler for RepaintRequester {
    fn handle_event(&mut self, event: &SketchEvent) {
        log::trace!("Repaint requested by {event:?}");
        self.ctx.request_repaint();
    }
}
