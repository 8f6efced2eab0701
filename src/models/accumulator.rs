/// Dense 3-D vote accumulator indexed `[column][row][radius]`
///
/// Cells are stored flat with radius as the fastest-varying axis, so one
/// column index owns a contiguous slab of `rows * radii` cells.
///
/// Cell values are unbounded `f64` sums of positive weights. Each vote is at
/// most `1 / (2π)`, so precision only degrades once a single cell collects on
/// the order of 10^15 votes; no overflow checks are performed.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    columns: usize,
    rows: usize,
    radii: usize,
    data: Vec<f64>,
}

impl Accumulator {
    /// Zeroed accumulator with the given extents
    pub fn new(columns: usize, rows: usize, radii: usize) -> Self {
        Self {
            columns,
            rows,
            radii,
            data: vec![0.0; columns * rows * radii],
        }
    }

    /// Number of column cells
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of row cells
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of radius cells
    pub fn radii(&self) -> usize {
        self.radii
    }

    /// `(columns, rows, radii)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.columns, self.rows, self.radii)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the accumulator has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cells in one column slab
    #[inline]
    pub fn slab_len(&self) -> usize {
        self.rows * self.radii
    }

    /// Flat index of a cell
    #[inline]
    pub fn index(&self, column: usize, row: usize, radius: usize) -> usize {
        (column * self.rows + row) * self.radii + radius
    }

    /// Value at a cell. Panics when out of bounds.
    #[inline]
    pub fn get(&self, column: usize, row: usize, radius: usize) -> f64 {
        self.data[self.index(column, row, radius)]
    }

    /// Add `weight` to a cell. Panics when out of bounds.
    #[inline]
    pub fn add(&mut self, column: usize, row: usize, radius: usize, weight: f64) {
        debug_assert!(weight >= 0.0, "votes must be non-negative");
        debug_assert!(
            column < self.columns && row < self.rows && radius < self.radii,
            "cell ({}, {}, {}) outside {:?}",
            column,
            row,
            radius,
            self.dims()
        );
        let index = self.index(column, row, radius);
        self.data[index] += weight;
    }

    /// Flat cell values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable flat cell values
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sum of all cells
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Number of cells holding at least one vote
    pub fn non_zero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }
}
