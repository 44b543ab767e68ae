use std::io;
use thiserror::Error;

/// The primary error type for the `cdb2net-lib` library.
///
/// Every variant is fatal for a dump run. Conditions the decoder recovers from
/// (skipped lines, unknown codes, unframed response headers) never show up here.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid `{field}` on line {line}: {reason}")]
    InvalidField {
        line: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid hex data on line {line}: {source}")]
    Hex {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Bad request header on line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: FrameError,
    },

    #[error("Failed to decode {message} on line {line}: {source}")]
    Decode {
        line: usize,
        message: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

/// Why a frame header could not be unpacked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("Insufficient data: expected {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("Trailing data: expected {expected} bytes, got {actual}")]
    TrailingData { expected: usize, actual: usize },
}

impl DumpError {
    /// Line number of the input that caused the error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            DumpError::Io(_) => None,
            DumpError::Json { line, .. }
            | DumpError::InvalidField { line, .. }
            | DumpError::Hex { line, .. }
            | DumpError::Frame { line, .. }
            | DumpError::Decode { line, .. } => Some(*line),
        }
    }
}
