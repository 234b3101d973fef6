use crate::drawable::Drawable;

/// Committed drawables plus the ones that were undone.
///
/// History is linear: committing anything new throws away the redo stack.
/// Neither stack has a capacity bound.
#[derive(Debug, Default, Clone)]
pub struct HistoryLog {
    /// Committed drawables, oldest first
    undo_stack: Vec<Drawable>,
    /// Undone drawables, the most recently undone last
    redo_stack: Vec<Drawable>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable and drop everything that could have been redone
    pub fn commit(&mut self, drawable: Drawable) {
        log::debug!(
            "Committing {} ({} discarded from redo)",
            drawable.kind(),
            self.redo_stack.len()
        );
        self.undo_stack.push(drawable);
        self.redo_stack.clear();
    }

    /// Move the newest committed drawable onto the redo stack.
    /// Returns false, changing nothing, when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(drawable) => {
                self.redo_stack.push(drawable);
                true
            }
            None => false,
        }
    }

    /// Inverse of [`HistoryLog::undo`]
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(drawable) => {
                self.undo_stack.push(drawable);
                true
            }
            None => false,
        }
    }

    /// Empty both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Committed drawables in commit order
    pub fn snapshot(&self) -> &[Drawable] {
        &self.undo_stack
    }

    /// Undone drawables, the next one to redo last
    pub fn redo_stack(&self) -> &[Drawable] {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
