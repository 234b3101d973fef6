use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ExportError;
use crate::input::InputEvent;
use crate::sketchpad::Sketchpad;

/// A [`Sketchpad`] that several threads may feed input into.
///
/// Inputs are applied one at a time under a single lock, so each one and the
/// repaints it triggers complete before the next input is looked at.
#[derive(Debug, Clone)]
pub struct SharedSketchpad {
    inner: Arc<Mutex<Sketchpad>>,
}

impl SharedSketchpad {
    pub fn new(sketchpad: Sketchpad) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sketchpad)),
        }
    }

    pub fn handle(&self, input: InputEvent) -> Result<Option<Vec<u8>>, ExportError> {
        self.inner.lock().handle(input)
    }

    /// Run `f` with exclusive access to the sketchpad
    pub fn with<R>(&self, f: impl FnOnce(&mut Sketchpad) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
