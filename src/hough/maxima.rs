//! Strict local-maximum extraction over the accumulator
//!
//! A cell qualifies when it is strictly greater than every other cell of the
//! K×K×K cube centered on it. Cells closer than `K / 2` to any border are never
//! examined. Plateaus of equal values therefore yield no maxima.
//!
//! Complexity: O(C·K³) worst case for C interior cells, with early exit on the
//! first neighbor that is greater or equal.

use rayon::prelude::*;

use crate::models::{Accumulator, CandidateMaximum};

/// Local-maximum search with a fixed neighborhood
pub struct MaximaExtractor {
    padding: usize,
    offsets: Vec<isize>,
}

impl MaximaExtractor {
    /// Prepare the neighbor offsets for `accumulator` with odd width `neighborhood`
    pub fn new(accumulator: &Accumulator, neighborhood: usize) -> Self {
        let padding = neighborhood / 2;
        Self {
            padding,
            offsets: neighbor_offsets(accumulator, padding),
        }
    }

    /// Neighborhood half-width
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// All qualifying cells in scan order (column, then row, then radius)
    pub fn find_all(&self, accumulator: &Accumulator, parallel: bool) -> Vec<CandidateMaximum> {
        let columns = self.interior(accumulator.columns());
        if parallel {
            columns
                .into_par_iter()
                .map(|column| self.scan_column(accumulator, column))
                .collect::<Vec<_>>()
                .concat()
        } else {
            columns
                .flat_map(|column| self.scan_column(accumulator, column))
                .collect()
        }
    }

    /// Top `n_circles` maxima, strongest first
    pub fn extract(
        &self,
        accumulator: &Accumulator,
        n_circles: usize,
        parallel: bool,
    ) -> Vec<CandidateMaximum> {
        let mut maxima = self.find_all(accumulator, parallel);
        rank(&mut maxima, n_circles);
        maxima
    }

    fn interior(&self, len: usize) -> std::ops::Range<usize> {
        self.padding..len.saturating_sub(self.padding).max(self.padding)
    }

    fn scan_column(&self, accumulator: &Accumulator, column: usize) -> Vec<CandidateMaximum> {
        let data = accumulator.as_slice();
        let mut found = Vec::new();

        for row in self.interior(accumulator.rows()) {
            let base = accumulator.index(column, row, 0);
            for radius in self.interior(accumulator.radii()) {
                let index = base + radius;
                let value = data[index];
                // Cells are non-negative, so an empty cell can never beat its neighbors
                if value <= 0.0 {
                    continue;
                }
                let is_maximum = self
                    .offsets
                    .iter()
                    .all(|&offset| data[index.wrapping_add_signed(offset)] < value);
                if is_maximum {
                    log::trace!(
                        "local maximum at ({}, {}, {}) = {}",
                        column,
                        row,
                        radius,
                        value
                    );
                    found.push(CandidateMaximum::new(column, row, radius, value));
                }
            }
        }

        found
    }
}

/// Sort descending by value (stable, so equal values keep scan order) and
/// keep the first `n_circles`
pub fn rank(maxima: &mut Vec<CandidateMaximum>, n_circles: usize) {
    maxima.sort_by(|a, b| b.value.total_cmp(&a.value));
    maxima.truncate(n_circles);
}

/// Flat offsets of every cell in the cube of half-width `padding`, except the
/// center
fn neighbor_offsets(accumulator: &Accumulator, padding: usize) -> Vec<isize> {
    let p = padding as isize;
    let rows = accumulator.rows() as isize;
    let radii = accumulator.radii() as isize;
    let mut offsets = Vec::with_capacity(((2 * padding + 1).pow(3)).saturating_sub(1));

    for dx in -p..=p {
        for dy in -p..=p {
            for dz in -p..=p {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                offsets.push((dx * rows + dy) * radii + dz);
            }
        }
    }

    offsets
}
