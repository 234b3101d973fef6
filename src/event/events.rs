/// Notifications the drawing core raises after handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchEvent {
    /// Committed history or the in-progress stroke changed
    Changed,
    /// Only the idle cursor preview changed
    ToolMoved,
}
