//! Error types for gridbox.

use thiserror::Error;

/// Result alias for gridbox operations.
pub type GridBoxResult<T> = std::result::Result<T, GridBoxError>;

/// Errors that can occur when running gridbox algorithms.
///
/// Only input-contract violations are reported as errors. Degenerate
/// geometry (inverted or zero-area boxes) and empty result sets are valid
/// states handled silently by the algorithms themselves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridBoxError {
    /// A tensor dimension disagrees with what the configuration implies.
    #[error("shape mismatch for {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Expected extent along the offending dimension.
        expected: usize,
        /// Actual extent supplied by the caller.
        got: usize,
        /// Which input the mismatch was detected on.
        context: &'static str,
    },
    /// The backing slice is too short for the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall {
        /// Minimum length required by the view shape.
        needed: usize,
        /// Actual slice length.
        got: usize,
    },
    /// A view was requested with a zero-sized dimension.
    #[error("invalid dimensions: {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}
