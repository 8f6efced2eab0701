/// Compact binary edge mask, one bit per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl EdgeMask {
    /// Create an empty (all background) mask with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a mask from one byte per pixel, any non-zero byte is an edge
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize) -> Option<Self> {
        if bytes.len() != width * height {
            return None;
        }
        let mut mask = Self::new(width, height);
        for (index, &value) in bytes.iter().enumerate() {
            if value != 0 {
                mask.data[index / 8] |= 1 << (index % 8);
            }
        }
        Some(mask)
    }

    /// Get mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether (x, y) is an edge pixel
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        (self.data[byte_index] >> bit_index) & 1 == 1
    }

    /// Mark or clear (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of edge pixels
    pub fn count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Expand to one byte per pixel (255 = edge, 0 = background)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.width * self.height];
        for (index, px) in out.iter_mut().enumerate() {
            if (self.data[index / 8] >> (index % 8)) & 1 == 1 {
                *px = 255;
            }
        }
        out
    }
}

impl Default for EdgeMask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
