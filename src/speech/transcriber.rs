use std::fmt;

use async_trait::async_trait;

/// Errors from a transcription backend.
/// Variants mirror what a caller could act on: fix config, retry, or give up.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscribeError {
    /// Backend misconfigured (missing URL, bad key). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned an error response.
    Api { status: u16, message: String },
    /// Backend response wasn't the expected shape.
    Parse(String),
}

impl fmt::Display for TranscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscribeError::Config(msg) => write!(f, "config error: {msg}"),
            TranscribeError::Network(msg) => write!(f, "network error: {msg}"),
            TranscribeError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TranscribeError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TranscribeError {}

/// Speech-to-text over a finished recording.
///
/// `audio` is a complete WAV file (16-bit PCM, mono).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError>;
}
