//! Scanner construction errors.

use thiserror::Error;

/// An error raised while building a scanner.
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// The unit to convert cannot be empty.
    #[error("unit to convert must not be empty")]
    EmptyUnit,

    /// A region marker cannot be empty.
    #[error("region markers must not be empty")]
    EmptyMarker,

    /// A scanning pattern failed to compile.
    #[error("invalid scanning pattern: {0}")]
    Pattern(#[from] regex::Error),
}
