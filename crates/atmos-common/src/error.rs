//! Error types for atmosphere loading and editing.

use thiserror::Error;

/// Result type alias using AtmosError.
pub type AtmosResult<T> = Result<T, AtmosError>;

/// Errors surfaced by the store, the editor and the viewport.
#[derive(Debug, Error)]
pub enum AtmosError {
    /// Missing or malformed dataset in the backing file
    #[error("Invalid atmosphere file: {0}")]
    FileFormat(String),

    /// Out-of-range time/depth index or unrecognized quantity name
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// Write length does not match the target range
    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Operation requires an open store
    #[error("Atmosphere store is closed")]
    ClosedStore,

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by the NetCDF/HDF5 library
    #[error("NetCDF error: {0}")]
    Backend(String),
}

impl AtmosError {
    /// Create a FileFormat error.
    pub fn file_format(msg: impl Into<String>) -> Self {
        Self::FileFormat(msg.into())
    }

    /// Create an InvalidIndex error.
    pub fn invalid_index(msg: impl Into<String>) -> Self {
        Self::InvalidIndex(msg.into())
    }

    /// Create a Backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// True if the error came from user input rather than the file or library.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AtmosError::InvalidIndex(_) | AtmosError::ShapeMismatch { .. } | AtmosError::ClosedStore
        )
    }
}
