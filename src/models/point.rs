/// Integer pixel coordinate of an edge pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgePoint {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl EdgePoint {
    /// Create a new edge point
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}
