pub mod scripted;
pub mod transcribing;

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::mpsc::Sender;

use crate::core::config::ResolvedConfig;
use crate::speech::transcribers::mock::DEFAULT_MOCK_TRANSCRIPT;
use crate::speech::transcribers::{HttpTranscriber, MockTranscriber};
use crate::speech::{SpeechError, SpeechRecognizer, StopSignal, Transcriber, TranscriptFragment};

pub use scripted::{ScriptStep, ScriptedRecognizer};
pub use transcribing::TranscribingRecognizer;

/// Stand-in when voice input is switched off: reports no capability.
pub struct UnavailableRecognizer;

#[async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    fn name(&self) -> &str {
        "none"
    }

    fn is_supported(&self) -> bool {
        false
    }

    async fn request_permission(&self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    async fn recognize(
        &self,
        _sender: Sender<TranscriptFragment>,
        _stop: StopSignal,
    ) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }
}

/// Build a recognizer from a resolved config's recognizer name.
pub fn build_recognizer(config: &ResolvedConfig) -> Arc<dyn SpeechRecognizer> {
    match config.recognizer.as_str() {
        "none" => Arc::new(UnavailableRecognizer),
        "transcribe" => Arc::new(TranscribingRecognizer::new(build_transcriber(config))),
        other => {
            if other != "scripted" {
                warn!("Unknown recognizer '{}', falling back to scripted", other);
            }
            Arc::new(ScriptedRecognizer::from_utterance(
                &config.utterance,
                config.start_delay,
                config.word_interval,
            ))
        }
    }
}

fn build_transcriber(config: &ResolvedConfig) -> Arc<dyn Transcriber> {
    match config.transcriber_kind.as_str() {
        "http" => {
            let base_url = config.transcriber_base_url.clone().unwrap_or_default();
            info!("Using HTTP transcriber at {:?}", base_url);
            Arc::new(HttpTranscriber::new(
                base_url,
                config.transcriber_api_key.clone(),
                config.transcriber_model.clone(),
            ))
        }
        other => {
            if other != "mock" {
                warn!("Unknown transcriber '{}', falling back to mock", other);
            }
            let transcript = config
                .mock_transcript
                .clone()
                .unwrap_or_else(|| DEFAULT_MOCK_TRANSCRIPT.to_string());
            Arc::new(MockTranscriber::new(config.mock_delay, transcript))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{VidchatConfig, resolve};

    fn resolved(recognizer: &str) -> ResolvedConfig {
        resolve(&VidchatConfig::default(), Some(recognizer), None)
    }

    #[test]
    fn builds_named_recognizers() {
        assert_eq!(build_recognizer(&resolved("scripted")).name(), "scripted");
        assert_eq!(build_recognizer(&resolved("transcribe")).name(), "transcribe");
        let none = build_recognizer(&resolved("none"));
        assert_eq!(none.name(), "none");
        assert!(!none.is_supported());
    }

    #[test]
    fn unknown_recognizer_falls_back_to_scripted() {
        assert_eq!(build_recognizer(&resolved("whisper-live")).name(), "scripted");
    }

    #[test]
    fn transcribing_recognizer_is_batch() {
        assert!(!build_recognizer(&resolved("transcribe")).is_streaming());
    }
}
