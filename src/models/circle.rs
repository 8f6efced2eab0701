/// Local maximum of the accumulator, in index space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateMaximum {
    /// Column (center-x) index
    pub column: usize,
    /// Row (center-y) index
    pub row: usize,
    /// Radius index
    pub radius: usize,
    /// Accumulated vote value
    pub value: f64,
}

impl CandidateMaximum {
    /// Create a new candidate
    pub fn new(column: usize, row: usize, radius: usize, value: f64) -> Self {
        Self {
            column,
            row,
            radius,
            value,
        }
    }
}

/// Detected circle in image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center column in pixels
    pub x: i64,
    /// Center row in pixels
    pub y: i64,
    /// Radius in pixels
    pub radius: i64,
    /// Accumulated vote value backing this detection
    pub votes: f64,
}

impl Circle {
    /// Create a new circle
    pub fn new(x: i64, y: i64, radius: i64, votes: f64) -> Self {
        Self {
            x,
            y,
            radius,
            votes,
        }
    }

    /// `(x, y, radius)` triple
    pub fn as_tuple(&self) -> (i64, i64, i64) {
        (self.x, self.y, self.radius)
    }

    /// Whether every coordinate is within `tolerance` pixels of the reference
    pub fn is_near(&self, x: i64, y: i64, radius: i64, tolerance: i64) -> bool {
        (self.x - x).abs() <= tolerance
            && (self.y - y).abs() <= tolerance
            && (self.radius - radius).abs() <= tolerance
    }
}

impl std::fmt::Display for Circle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "center=({}, {}) radius={} votes={:.4}",
            self.x, self.y, self.radius, self.votes
        )
    }
}
