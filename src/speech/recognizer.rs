use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;

use super::transcriber::TranscribeError;

/// Errors a speech capture session can end with.
/// All of them end the session; none are retried automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechError {
    /// The runtime has no usable speech capture. Terminal for the session.
    Unsupported,
    /// The user (or the platform) refused microphone access.
    PermissionDenied(String),
    /// Recognition failed mid-session (device lost, network hiccup, ...).
    Recognition(String),
    /// The batch transcription backend failed.
    Transcription(TranscribeError),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Unsupported => write!(f, "speech recognition is not supported"),
            SpeechError::PermissionDenied(msg) => write!(f, "microphone permission denied: {msg}"),
            SpeechError::Recognition(msg) => write!(f, "recognition error: {msg}"),
            SpeechError::Transcription(e) => write!(f, "transcription error: {e}"),
        }
    }
}

impl std::error::Error for SpeechError {}

impl From<TranscribeError> for SpeechError {
    fn from(e: TranscribeError) -> Self {
        SpeechError::Transcription(e)
    }
}

/// One recognition result. `text` is the recognizer's full best guess for
/// the utterance so far, so consumers replace rather than append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFragment {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptFragment {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn final_(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// Sending half of a stop signal. Dropping it also counts as a stop.
#[derive(Debug)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        // Receiver may already be gone if the recognizer returned on its own.
        let _ = self.tx.send(true);
    }
}

/// Receiving half of a stop signal, handed to [`SpeechRecognizer::recognize`].
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// Resolves once stop was requested (or the handle was dropped).
    pub async fn stopped(&mut self) {
        loop {
            let stopped = *self.rx.borrow_and_update();
            if stopped || self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }
}

pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// A platform speech capture capability.
///
/// `recognize` runs until `stop` fires or the recognizer ends on its own,
/// sending fragments as they arrive. Returning `Ok` means the session ended
/// normally; returning `Err` aborts it.
///
/// Streaming recognizers deliver results while recording and are dropped as
/// soon as the session stops. Batch recognizers (`is_streaming() == false`)
/// only capture while recording; after `stop` they are given time to produce
/// their transcript before returning.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Returns the name of the recognizer.
    fn name(&self) -> &str;

    fn is_supported(&self) -> bool {
        true
    }

    fn is_streaming(&self) -> bool {
        true
    }

    /// Asks for microphone access. Called before every session.
    async fn request_permission(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn recognize(
        &self,
        sender: Sender<TranscriptFragment>,
        stop: StopSignal,
    ) -> Result<(), SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_signal_resolves_after_stop() {
        let (handle, mut signal) = stop_channel();
        assert!(!signal.is_stopped());
        handle.stop();
        signal.stopped().await;
        assert!(signal.is_stopped());
    }

    #[tokio::test]
    async fn dropped_handle_counts_as_stop() {
        let (handle, mut signal) = stop_channel();
        drop(handle);
        signal.stopped().await;
        assert!(signal.is_stopped());
    }

    #[test]
    fn error_display_mentions_cause() {
        let err = SpeechError::PermissionDenied("blocked by user".into());
        assert_eq!(
            err.to_string(),
            "microphone permission denied: blocked by user"
        );
    }
}
