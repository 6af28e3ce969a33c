//! Common error types for override generation and application.

use thiserror::Error;

/// Errors produced by the override pipeline.
///
/// Everything here is recovered at the request boundary and turned into a
/// user-facing message; a failed request never takes the process down.
#[derive(Debug, Error)]
pub enum HiDpiError {
    /// Malformed resolution selection. Never reaches the privileged stage.
    #[error("{0}")]
    InvalidSelection(String),

    /// A dimension whose doubled form does not fit the 8-hex-digit field.
    #[error("resolution {width}x{height} is too large to encode")]
    ResolutionTooLarge { width: u32, height: u32 },

    /// The elevated script exited non-zero, or the user dismissed the
    /// administrator prompt.
    #[error("privileged operation failed: {output}")]
    Transaction { output: String },

    /// Staging file could not be written or the channel process could not
    /// be spawned.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for override operations.
pub type HiDpiResult<T> = Result<T, HiDpiError>;
