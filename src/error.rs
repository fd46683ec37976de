//! Error types for kotoba

use thiserror::Error;

/// Result type alias for kotoba operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kotoba
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed base64 audio payload
    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// PCM byte length is not a whole number of frames
    #[error("malformed PCM payload: {byte_len} bytes is not a whole number of {block_align}-byte frames")]
    MalformedPcm {
        /// Length of the rejected payload
        byte_len: usize,
        /// Bytes per frame expected by the caller-supplied format
        block_align: usize,
    },

    /// Generation service returned no audio data at all
    #[error("generation service returned no audio data")]
    EmptyPayload,

    /// Word record from the generation service does not match the expected shape
    #[error("word record schema error: {0}")]
    Schema(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// Word analysis error
    #[error("analysis error: {0}")]
    Analysis(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
