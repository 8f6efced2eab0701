pub mod accumulator;
pub mod circle;
pub mod edge_mask;
pub mod gradient;
pub mod point;

pub use accumulator::Accumulator;
pub use circle::{CandidateMaximum, Circle};
pub use edge_mask::EdgeMask;
pub use gradient::GradientField;
pub use point::EdgePoint;
