//! Error types for the ecuscope ROM analysis crate.
//!
//! The core algorithms are total over well-formed input and never return
//! these errors; they surface from the outer layer that loads images,
//! definition catalogs and configuration.

use crate::io::error::IoError;
use thiserror::Error;

/// Main error type for ecuscope operations.
#[derive(Debug, Error)]
pub enum EcuError {
    /// Image length is neither 32KB nor 64KB
    #[error("Image size must be 32KB or 64KB, found {found} bytes")]
    InvalidImageSize { found: usize },

    /// Image file extension is not `.bin` or `.rom`
    #[error("Unsupported image extension: {0:?} (expected .bin or .rom)")]
    UnsupportedExtension(String),

    /// Region bounds violate `start <= end <= len`
    #[error("Invalid region [{start:#x}, {end:#x}) for buffer of {len} bytes")]
    InvalidRegion { start: usize, end: usize, len: usize },

    /// Definition document does not have the expected shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bounded reader errors
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

/// Result type alias for ecuscope operations
pub type Result<T> = std::result::Result<T, EcuError>;
