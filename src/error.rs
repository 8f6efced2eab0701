use thiserror::Error;

/// Errors raised while detecting circles
#[derive(Error, Debug)]
pub enum HoughError {
    /// Inputs are inconsistent with each other or with their declared size
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Run parameters cannot produce a meaningful accumulator
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Accumulator would exceed the configured cell budget
    #[error("accumulator of {columns}x{rows}x{radii} cells exceeds the limit of {limit} cells")]
    AccumulatorTooLarge {
        /// Column cells requested
        columns: usize,
        /// Row cells requested
        rows: usize,
        /// Radius cells requested
        radii: usize,
        /// Configured maximum
        limit: usize,
    },
    /// Image decoding or encoding failed
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HoughError>;
