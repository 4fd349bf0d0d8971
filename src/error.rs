//! Error types shared across the engine.
//!
//! Every fallible operation in the crate returns [`Result`] with
//! [`EngineError`]. Locale fallback in display names is the one lookup that
//! never fails (it falls back to the distinct name instead).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Two-image operations require equal dimensions.
    #[error("image dimensions mismatch: {first:?} vs {second:?}")]
    DimensionMismatch {
        first: (u32, u32),
        second: (u32, u32),
    },

    /// Resize targets must be positive in both dimensions.
    #[error("resize target must be positive, got {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },

    /// Operations reject surfaces with a zero dimension.
    #[error("image width and height must be positive")]
    EmptyImage,

    /// Tone curves need 3-5 points in [0,1] with strictly increasing x.
    #[error("invalid tone curve: {0}")]
    InvalidToneCurve(String),

    /// Registry names are unique; the offending name is reported.
    #[error("duplicate filter name: {0:?}")]
    DuplicateFilterName(String),

    /// Position lookup outside the registry's range.
    #[error("filter index {index} out of range (registry holds {count})")]
    IndexOutOfRange { index: usize, count: usize },
}
