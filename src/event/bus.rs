use std::cell::RefCell;

use crate::event::{EventHandler, SketchEvent};

/// Queues notifications in the order they were raised and fans them out to
/// registered handlers once the owner has applied the change.
pub struct EventBus {
    pending: Vec<SketchEvent>,
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending)
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Queue an event for the next [`EventBus::drain`]
    pub fn emit(&mut self, event: SketchEvent) {
        self.pending.push(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<SketchEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deliver an event to all registered handlers
    pub fn notify(&self, event: SketchEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_drain_preserves_order() {
        let mut bus = EventBus::new();
        bus.emit(SketchEvent::ToolMoved);
        bus.emit(SketchEvent::Changed);

        assert!(bus.has_pending());
        assert_eq!(bus.drain(), vec![SketchEvent::ToolMoved, SketchEvent::Changed]);
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_notify_reaches_every_handler() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            bus.subscribe(Box::new(move |event: &SketchEvent| {
                seen.lock().unwrap().push(*event);
            }));
        }

        bus.notify(SketchEvent::Changed);
        assert_eq!(*seen.lock().unwrap(), vec![SketchEvent::Changed; 2]);
    }
}
