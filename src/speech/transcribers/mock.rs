use std::time::Duration;

use async_trait::async_trait;

use crate::speech::{TranscribeError, Transcriber};

pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_MOCK_TRANSCRIPT: &str =
    "This is a simulated transcript of your question about the video.";

/// Placeholder speech-to-text: waits a fixed delay, then returns canned text
/// regardless of the audio.
pub struct MockTranscriber {
    delay: Duration,
    transcript: String,
}

impl MockTranscriber {
    pub fn new(delay: Duration, transcript: impl Into<String>) -> Self {
        Self {
            delay,
            transcript: transcript.into(),
        }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY, DEFAULT_MOCK_TRANSCRIPT)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.transcript.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_canned_text_after_delay() {
        let mock = MockTranscriber::default();
        let start = tokio::time::Instant::now();
        let text = tokio_test::assert_ok!(mock.transcribe(b"RIFF").await);
        assert_eq!(text, DEFAULT_MOCK_TRANSCRIPT);
        assert!(start.elapsed() >= DEFAULT_MOCK_DELAY);
    }
}
