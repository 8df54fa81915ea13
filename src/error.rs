//! Typed error taxonomy for the volume core.

use thiserror::Error;

/// Errors surfaced from operation entry points.
///
/// Per-slice worker tasks never produce this type directly: their inputs are
/// bounds-checked before dispatch, so the only way callers observe these
/// variants is through the public, non-parallel entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VdtkError {
    /// An argument was structurally invalid for the requested operation
    /// (non-positive scale factor, zero-width window, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two sizes that are required to agree do not (slice vs. axis extent,
    /// raw buffer length vs. voxel count).
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A coordinate or index fell outside the addressable volume.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, VdtkError>;
