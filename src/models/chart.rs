//! Chart projection models

/// A sample projected into normalized `[0,1] x [0,1]` chart space.
///
/// `x` runs left to right in arrival order, `y` runs top to bottom so the
/// highest price sits at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Result of a chart render pass
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    /// Chart written to disk with this many points
    Rendered { path: String, points: usize },
    /// Fewer than two samples recorded so far
    NothingToDraw,
}
