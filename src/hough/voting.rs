//! Gradient-directed vote accumulation
//!
//! Every edge pixel votes along the ray opposite to its gradient, once per
//! integer radius, into the cell of the rounded center. Votes are weighted by
//! `1 / (2πr)` so that large circles, which own more edge pixels, do not
//! dominate the accumulator.
//!
//! Complexity: O(E·R) for E edge pixels and R radii. `cos`/`sin` are computed
//! once per edge pixel.

use std::f64::consts::PI;
use std::ops::Range;

use rayon::prelude::*;

use super::discretizer::Discretizer;
use crate::models::{Accumulator, EdgePoint, GradientField};

/// Filled accumulator and the number of votes that landed in it
#[derive(Debug, Clone)]
pub struct Votes {
    /// Accumulated evidence
    pub accumulator: Accumulator,
    /// Votes that fell inside the image
    pub votes_cast: usize,
}

/// Reversed-gradient ray starting at one edge pixel
#[derive(Debug, Clone, Copy)]
struct Ray {
    x: f64,
    y: f64,
    cos: f64,
    sin: f64,
}

impl Ray {
    fn new(point: EdgePoint, gradient_angle: f64) -> Self {
        let theta = gradient_angle + PI;
        Self {
            x: point.x as f64,
            y: point.y as f64,
            cos: theta.cos(),
            sin: theta.sin(),
        }
    }

    /// Rounded center at `radius`, `None` outside the image
    #[inline]
    fn center(&self, radius: f64, width: f64, height: f64) -> Option<(f64, f64)> {
        let cx = (self.x + radius * self.cos).round_ties_even();
        let cy = (self.y + radius * self.sin).round_ties_even();
        if !(cx >= 0.0 && cx < width && cy >= 0.0 && cy < height) {
            return None;
        }
        Some((cx, cy))
    }

    /// Sub-range of `radii` whose center x can round into `[lo, hi]`.
    /// Conservative: callers still filter each vote exactly.
    ///
    /// A near-vertical ray keeps its center column within a fraction of a
    /// pixel of `x` over the whole sweep, so it spans either every radius or
    /// none.
    fn radius_span(&self, lo: f64, hi: f64, radii: Range<usize>) -> Range<usize> {
        if self.cos.abs() < 1e-9 {
            if self.x < lo || self.x > hi {
                return radii.start..radii.start;
            }
            return radii;
        }
        let t0 = (lo - self.x) / self.cos;
        let t1 = (hi - self.x) / self.cos;
        let (r_lo, r_hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        let start = (r_lo.floor() - 1.0).max(radii.start as f64);
        let end = (r_hi.ceil() + 2.0).min(radii.end as f64);
        if start >= end {
            return radii.start..radii.start;
        }
        start as usize..end as usize
    }
}

/// Builds the accumulator for one image geometry
pub struct AccumulatorBuilder<'a> {
    discretizer: &'a Discretizer,
    radii: Range<usize>,
    weights: Vec<f64>,
    radius_cells: Vec<usize>,
}

impl<'a> AccumulatorBuilder<'a> {
    /// Precompute per-radius weights and radius cells
    pub fn new(discretizer: &'a Discretizer) -> Self {
        let radii = discretizer.radius_range();
        let weights = radii.clone().map(vote_weight).collect();
        let radius_cells = radii
            .clone()
            .map(|r| discretizer.radius_index(r as f64))
            .collect();
        Self {
            discretizer,
            radii,
            weights,
            radius_cells,
        }
    }

    /// Integer radii swept per edge pixel
    pub fn radii(&self) -> Range<usize> {
        self.radii.clone()
    }

    /// Sequential or column-partitioned parallel build. Both produce
    /// bit-identical accumulators.
    pub fn build_with(
        &self,
        edges: &[EdgePoint],
        gradient: &GradientField,
        parallel: bool,
    ) -> Votes {
        if parallel {
            self.build_parallel(edges, gradient)
        } else {
            self.build(edges, gradient)
        }
    }

    /// Vote every edge pixel in order into a fresh accumulator
    pub fn build(&self, edges: &[EdgePoint], gradient: &GradientField) -> Votes {
        let mut accumulator = self.discretizer.new_accumulator();
        let mut votes_cast = 0usize;

        for &point in edges {
            let ray = Ray::new(point, gradient.get(point.x, point.y));
            self.cast_ray(&ray, self.radii.clone(), |column, row, radius, weight| {
                accumulator.add(column, row, radius, weight);
                votes_cast += 1;
            });
        }

        Votes {
            accumulator,
            votes_cast,
        }
    }

    /// Parallel build over column slabs of the accumulator.
    ///
    /// Each worker owns a contiguous range of columns and replays every ray in
    /// edge order, keeping only the votes that fall in its range. Every cell
    /// therefore receives its additions in the same order as [`Self::build`].
    pub fn build_parallel(&self, edges: &[EdgePoint], gradient: &GradientField) -> Votes {
        let mut accumulator = self.discretizer.new_accumulator();
        let (columns, rows, radii) = accumulator.dims();
        let slab = accumulator.slab_len();
        let columns_per_chunk = (columns / (rayon::current_num_threads() * 4)).max(1);
        let column_axis = self.discretizer.grid().column;

        let rays: Vec<Ray> = edges
            .iter()
            .map(|&p| Ray::new(p, gradient.get(p.x, p.y)))
            .collect();

        let votes_cast = accumulator
            .as_mut_slice()
            .par_chunks_mut(slab * columns_per_chunk)
            .enumerate()
            .map(|(chunk, cells)| {
                let first = chunk * columns_per_chunk;
                let last = first + cells.len() / slab;
                let lo = first as f64 * column_axis.step + column_axis.min - 1.5;
                let hi = last as f64 * column_axis.step + column_axis.min + 1.5;

                let mut cast = 0usize;
                for ray in &rays {
                    let span = ray.radius_span(lo, hi, self.radii.clone());
                    self.cast_ray(ray, span, |column, row, radius, weight| {
                        if column >= first && column < last {
                            debug_assert!(row < rows && radius < radii);
                            cells[((column - first) * rows + row) * radii + radius] += weight;
                            cast += 1;
                        }
                    });
                }
                cast
            })
            .sum();

        Votes {
            accumulator,
            votes_cast,
        }
    }

    #[inline]
    fn cast_ray<F>(&self, ray: &Ray, span: Range<usize>, mut vote: F)
    where
        F: FnMut(usize, usize, usize, f64),
    {
        let width = self.discretizer.width() as f64;
        let height = self.discretizer.height() as f64;

        for radius in span {
            let slot = radius - self.radii.start;
            let Some((cx, cy)) = ray.center(radius as f64, width, height) else {
                continue;
            };
            let Some((column, row)) = self.discretizer.center_cell(cx, cy) else {
                continue;
            };
            vote(column, row, self.radius_cells[slot], self.weights[slot]);
        }
    }
}

/// Vote weight at `radius`: inverse circumference
#[inline]
pub fn vote_weight(radius: usize) -> f64 {
    1.0 / (2.0 * PI * radius as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AxisGrid, GridParams};

    fn single_edge(width: usize, height: usize, x: usize, y: usize, angle: f64) -> Votes {
        let disc = Discretizer::new(GridParams::default(), width, height).unwrap();
        let mut gradient = GradientField::new(width, height);
        gradient.set(x, y, angle);
        AccumulatorBuilder::new(&disc).build(&[EdgePoint::new(x, y)], &gradient)
    }

    #[test]
    fn test_weight_normalization() {
        // Gradient angle 0 points right, so votes walk left from x = 10
        let votes = single_edge(20, 20, 10, 5, 0.0);
        let acc = &votes.accumulator;

        assert_eq!(votes.votes_cast, 10);
        for r in 1..=10usize {
            assert_eq!(acc.get(10 - r, 5, r - 1), vote_weight(r));
            assert_eq!(acc.get(10 - r, 5, r - 1), 1.0 / (2.0 * PI * r as f64));
        }
        // Radii 11.. would place the center at negative x
        assert_eq!(acc.non_zero(), 10);
    }

    #[test]
    fn test_vertical_gradient() {
        // Gradient pointing down (+y) votes upward
        let votes = single_edge(10, 10, 4, 6, PI / 2.0);
        let acc = &votes.accumulator;
        assert_eq!(votes.votes_cast, 6);
        for r in 1..=6usize {
            assert_eq!(acc.get(4, 6 - r, r - 1), vote_weight(r));
        }
    }

    #[test]
    fn test_ties_round_to_even() {
        let ray = Ray {
            x: 2.0,
            y: 2.0,
            cos: 0.5,
            sin: 0.25,
        };
        // 2 + 0.5 = 2.5 -> 2 (even), 2 + 0.25 = 2.25 -> 2
        assert_eq!(ray.center(1.0, 10.0, 10.0), Some((2.0, 2.0)));
        // 2 + 3 * 0.5 = 3.5 -> 4
        assert_eq!(ray.center(3.0, 10.0, 10.0).map(|c| c.0), Some(4.0));
    }

    #[test]
    fn test_out_of_image_votes_dropped() {
        // Corner pixel with an inward normal pointing out of the image
        let votes = single_edge(8, 8, 0, 0, PI / 4.0);
        assert_eq!(votes.votes_cast, 0);
        assert_eq!(votes.accumulator.non_zero(), 0);
    }

    #[test]
    fn test_nan_gradient_casts_nothing() {
        let votes = single_edge(8, 8, 4, 4, f64::NAN);
        assert_eq!(votes.votes_cast, 0);
    }

    #[test]
    fn test_bounds_along_borders() {
        let (width, height) = (13usize, 9usize);
        let disc = Discretizer::new(GridParams::default(), width, height).unwrap();
        let builder = AccumulatorBuilder::new(&disc);

        let mut edges = Vec::new();
        for x in 0..width {
            edges.push(EdgePoint::new(x, 0));
            edges.push(EdgePoint::new(x, height - 1));
        }
        for y in 0..height {
            edges.push(EdgePoint::new(0, y));
            edges.push(EdgePoint::new(width - 1, y));
        }

        for step in 0..64 {
            let angle = -PI + (step as f64 + 0.37) * (2.0 * PI / 64.0);
            let mut gradient = GradientField::new(width, height);
            for p in &edges {
                gradient.set(p.x, p.y, angle);
            }
            // Indexing panics if any vote leaves the accumulator
            let votes = builder.build(&edges, &gradient);
            assert!(votes.accumulator.as_slice().iter().all(|v| *v >= 0.0));
        }
    }

    #[test]
    fn test_coarse_grid_bounds() {
        let grid = GridParams {
            column: AxisGrid::new(3.0, 0.0),
            row: AxisGrid::new(2.5, 0.0),
            radius: AxisGrid::new(4.0, 2.0),
        };
        let disc = Discretizer::new(grid, 17, 11).unwrap();
        let builder = AccumulatorBuilder::new(&disc);
        let mut gradient = GradientField::new(17, 11);
        let mut edges = Vec::new();
        for y in 0..11 {
            for x in 0..17 {
                edges.push(EdgePoint::new(x, y));
                gradient.set(x, y, (x as f64 * 0.7 + y as f64 * 1.3).sin() * PI);
            }
        }
        let votes = builder.build(&edges, &gradient);
        assert!(votes.votes_cast > 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (width, height) = (40usize, 30usize);
        let disc = Discretizer::new(GridParams::default(), width, height).unwrap();
        let builder = AccumulatorBuilder::new(&disc);

        let mut gradient = GradientField::new(width, height);
        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if (x * 7 + y * 3) % 5 == 0 {
                    edges.push(EdgePoint::new(x, y));
                    gradient.set(x, y, ((x * 31 + y * 17) % 628) as f64 / 100.0 - PI);
                }
            }
        }

        let sequential = builder.build(&edges, &gradient);
        let parallel = builder.build_parallel(&edges, &gradient);
        assert_eq!(sequential.votes_cast, parallel.votes_cast);
        assert_eq!(sequential.accumulator, parallel.accumulator);
    }

    fn assert_parallel_matches(grid: GridParams, width: usize, height: usize, angles: &[f64]) {
        let disc = Discretizer::new(grid, width, height).unwrap();
        let builder = AccumulatorBuilder::new(&disc);

        let mut gradient = GradientField::new(width, height);
        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if (x * 5 + y * 11) % 3 == 0 {
                    edges.push(EdgePoint::new(x, y));
                    gradient.set(x, y, angles[(x * 7 + y) % angles.len()]);
                }
            }
        }

        let sequential = builder.build(&edges, &gradient);
        let parallel = builder.build_parallel(&edges, &gradient);
        assert!(sequential.votes_cast > 0);
        assert_eq!(sequential.votes_cast, parallel.votes_cast);
        assert_eq!(sequential.accumulator, parallel.accumulator);
    }

    #[test]
    fn test_parallel_matches_on_fractional_grids() {
        let angles: Vec<f64> = (0..29).map(|i| -PI + i as f64 * 0.217).collect();
        for (step, min) in [(0.7, 2.3), (0.3, -3.0), (2.5, -1.5), (3.0, 5.0)] {
            let grid = GridParams {
                column: AxisGrid::new(step, min),
                row: AxisGrid::new(1.3, -1.0),
                radius: AxisGrid::new(1.5, 1.0),
            };
            assert_parallel_matches(grid, 37, 23, &angles);
            assert_parallel_matches(grid, 23, 37, &angles);
        }
    }

    #[test]
    fn test_parallel_matches_on_near_vertical_rays() {
        let half = PI / 2.0;
        let angles = [
            half,
            -half,
            half + 1e-10,
            half - 1e-10,
            -half + 1e-10,
            -half - 1e-10,
            half + 3e-3,
            -half - 3e-3,
        ];
        assert_parallel_matches(GridParams::default(), 31, 27, &angles);

        let mut grid = GridParams::default();
        grid.column = AxisGrid::new(0.7, 2.3);
        assert_parallel_matches(grid, 31, 27, &angles);
    }

    #[test]
    fn test_vertical_ray_span() {
        let ray = Ray::new(EdgePoint::new(10, 4), PI / 2.0);
        assert!(ray.cos.abs() < 1e-9);
        assert_eq!(ray.radius_span(8.5, 11.5, 1..30), 1..30);
        assert_eq!(ray.radius_span(11.5, 14.5, 1..30), 1..1);
        assert_eq!(ray.radius_span(2.0, 9.5, 1..30), 1..1);

        // Just above the cutoff the span is derived from the slope
        let ray = Ray::new(EdgePoint::new(10, 4), PI / 2.0 + 3e-3);
        assert!(ray.radius_span(11.5, 14.5, 1..30).is_empty());
    }

    #[test]
    fn test_repeat_runs_identical() {
        let (width, height) = (25usize, 25usize);
        let disc = Discretizer::new(GridParams::default(), width, height).unwrap();
        let builder = AccumulatorBuilder::new(&disc);
        let mut gradient = GradientField::new(width, height);
        let edges: Vec<EdgePoint> = (0..width).map(|x| EdgePoint::new(x, x % height)).collect();
        for p in &edges {
            gradient.set(p.x, p.y, p.x as f64 * 0.3);
        }
        let a = builder.build(&edges, &gradient);
        let b = builder.build(&edges, &gradient);
        assert_eq!(a.accumulator, b.accumulator);
    }
}
