//! Error types for trueno-radar operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-radar operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a raster surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A mutator rejected its argument. Nothing was changed.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the rejected argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Saving or restoring a persisted plot definition failed.
    #[error("Persisted plot error at line {line}: {message}")]
    Persistence {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser or serializer message.
        message: String,
    },

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
