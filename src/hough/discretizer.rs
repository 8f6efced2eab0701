//! Mapping between image-space values and accumulator indices
//!
//! Each axis maps `v -> floor((v - min) / step)` and back with
//! `index * step + min`. Extents are `floor((max - min) / step) + 1`, where
//! `max` is `width - 1` for columns, `height - 1` for rows and the image
//! diagonal for radii.
use crate::config::{AxisGrid, GridParams};
use crate::error::{HoughError, Result};
use crate::models::{Accumulator, CandidateMaximum, Circle};

/// Accumulator geometry for one image size and grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    grid: GridParams,
    width: usize,
    height: usize,
    diagonal: f64,
    columns: usize,
    rows: usize,
    radii: usize,
}

impl Discretizer {
    /// Compute the accumulator geometry for a `width x height` image
    pub fn new(grid: GridParams, width: usize, height: usize) -> Result<Self> {
        grid.validate()?;
        if width == 0 || height == 0 {
            return Err(HoughError::InvalidInput(format!(
                "image must not be empty, got {}x{}",
                width, height
            )));
        }

        let diagonal_sq = width
            .checked_mul(width)
            .zip(height.checked_mul(height))
            .and_then(|(w2, h2)| w2.checked_add(h2))
            .ok_or_else(|| {
                HoughError::InvalidInput(format!(
                    "image diagonal of {}x{} overflows",
                    width, height
                ))
            })?;
        let diagonal = (diagonal_sq as f64).sqrt();
        let columns = axis_len((width - 1) as f64, &grid.column);
        let rows = axis_len((height - 1) as f64, &grid.row);
        let radii = axis_len(diagonal, &grid.radius);

        if columns == 0 || rows == 0 || radii == 0 {
            return Err(HoughError::Configuration(format!(
                "grid minimums leave an empty accumulator ({}x{}x{}) for a {}x{} image",
                columns, rows, radii, width, height
            )));
        }

        Ok(Self {
            grid,
            width,
            height,
            diagonal,
            columns,
            rows,
            radii,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Image diagonal length
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// Grid parameters in use
    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    /// Accumulator extents `(columns, rows, radii)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.columns, self.rows, self.radii)
    }

    /// Total cell count, `None` on overflow
    pub fn cell_count(&self) -> Option<usize> {
        self.columns
            .checked_mul(self.rows)
            .and_then(|n| n.checked_mul(self.radii))
    }

    /// Fail when the accumulator would exceed `limit` cells
    pub fn check_cell_limit(&self, limit: usize) -> Result<()> {
        match self.cell_count() {
            Some(cells) if cells <= limit => Ok(()),
            _ => Err(HoughError::AccumulatorTooLarge {
                columns: self.columns,
                rows: self.rows,
                radii: self.radii,
                limit,
            }),
        }
    }

    /// Zeroed accumulator of the right size
    pub fn new_accumulator(&self) -> Accumulator {
        Accumulator::new(self.columns, self.rows, self.radii)
    }

    /// Integer radii swept per edge pixel: `ceil(min_radius)..floor(diagonal)`
    ///
    /// The upper bound is exclusive, so the last radius cells of the
    /// accumulator may never receive votes.
    pub fn radius_range(&self) -> std::ops::Range<usize> {
        let start = self.grid.radius.min.ceil() as usize;
        let end = self.diagonal.floor() as usize;
        start..end.max(start)
    }

    /// Column index of a center x-coordinate
    #[inline]
    pub fn column_index(&self, x: f64) -> usize {
        to_index(x, &self.grid.column)
    }

    /// Row index of a center y-coordinate
    #[inline]
    pub fn row_index(&self, y: f64) -> usize {
        to_index(y, &self.grid.row)
    }

    /// Radius index of a radius
    #[inline]
    pub fn radius_index(&self, radius: f64) -> usize {
        to_index(radius, &self.grid.radius)
    }

    /// Column and row cell of an in-image center, `None` when a positive grid
    /// minimum places it before the first cell
    #[inline]
    pub fn center_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let column = ((x - self.grid.column.min) / self.grid.column.step).floor();
        let row = ((y - self.grid.row.min) / self.grid.row.step).floor();
        if column < 0.0
            || row < 0.0
            || column >= self.columns as f64
            || row >= self.rows as f64
        {
            return None;
        }
        Some((column as usize, row as usize))
    }

    /// Center x-coordinate of a column index
    pub fn column_value(&self, index: usize) -> f64 {
        to_value(index, &self.grid.column)
    }

    /// Center y-coordinate of a row index
    pub fn row_value(&self, index: usize) -> f64 {
        to_value(index, &self.grid.row)
    }

    /// Radius of a radius index
    pub fn radius_value(&self, index: usize) -> f64 {
        to_value(index, &self.grid.radius)
    }

    /// Convert a candidate back to image coordinates, truncating toward zero
    pub fn materialize(&self, candidate: &CandidateMaximum) -> Circle {
        Circle::new(
            self.column_value(candidate.column) as i64,
            self.row_value(candidate.row) as i64,
            self.radius_value(candidate.radius) as i64,
            candidate.value,
        )
    }
}

fn axis_len(max: f64, axis: &AxisGrid) -> usize {
    let cells = ((max - axis.min) / axis.step).floor() + 1.0;
    if cells < 1.0 { 0 } else { cells as usize }
}

#[inline]
fn to_index(value: f64, axis: &AxisGrid) -> usize {
    ((value - axis.min) / axis.step).floor() as usize
}

#[inline]
fn to_value(index: usize, axis: &AxisGrid) -> f64 {
    index as f64 * axis.step + axis.min
}
