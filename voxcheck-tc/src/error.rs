//! Error types for voxcheck-tc
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for the transcoding client
#[derive(Error, Debug)]
pub enum Error {
    /// Input bytes are not a decodable audio stream
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Decoding succeeded but produced no usable channel/frame data
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors talking to the scoring service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Scoring service returned an error or an unexpected response shape
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using voxcheck-tc Error
pub type Result<T> = std::result::Result<T, Error>;
