/// Per-pixel gradient direction in radians, row-major, range (-π, π]
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl GradientField {
    /// Field of zero angles
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` on length mismatch.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_raw(data: Vec<f64>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Field width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Angle at (x, y). Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Set the angle at (x, y)
    pub fn set(&mut self, x: usize, y: usize, angle: f64) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = angle;
    }

    /// Raw row-major angles
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
