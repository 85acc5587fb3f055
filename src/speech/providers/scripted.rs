//! Simulated live speech recognition.
//!
//! Plays back a script of timed transcript fragments, then keeps "listening"
//! in silence until stopped, the way a continuous recognizer does. Used as the
//! default recognizer when no real speech backend is available, and by tests.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::sync::mpsc::Sender;

use crate::speech::{SpeechError, SpeechRecognizer, StopSignal, TranscriptFragment};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Silence for the given duration.
    Wait(Duration),
    /// Deliver a fragment (full best guess so far).
    Say { text: String, is_final: bool },
    /// Abort the session with an error.
    Fail(SpeechError),
}

pub struct ScriptedRecognizer {
    steps: Vec<ScriptStep>,
    supported: bool,
    permission: Result<(), SpeechError>,
}

impl ScriptedRecognizer {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            supported: true,
            permission: Ok(()),
        }
    }

    /// Speak `utterance` word by word: wait `start_delay`, then one cumulative
    /// interim fragment per word every `word_interval`, the last one final.
    pub fn from_utterance(utterance: &str, start_delay: Duration, word_interval: Duration) -> Self {
        let words: Vec<&str> = utterance.split_whitespace().collect();
        let mut steps = vec![ScriptStep::Wait(start_delay)];
        let mut heard = String::new();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                heard.push(' ');
                steps.push(ScriptStep::Wait(word_interval));
            }
            heard.push_str(word);
            steps.push(ScriptStep::Say {
                text: heard.clone(),
                is_final: i + 1 == words.len(),
            });
        }
        Self::new(steps)
    }

    /// A recognizer the runtime doesn't support.
    pub fn unsupported() -> Self {
        Self {
            steps: Vec::new(),
            supported: false,
            permission: Err(SpeechError::Unsupported),
        }
    }

    /// Refuse microphone access with the given reason.
    pub fn deny_permission(mut self, reason: &str) -> Self {
        self.permission = Err(SpeechError::PermissionDenied(reason.to_string()));
        self
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn request_permission(&self) -> Result<(), SpeechError> {
        self.permission.clone()
    }

    async fn recognize(
        &self,
        sender: Sender<TranscriptFragment>,
        mut stop: StopSignal,
    ) -> Result<(), SpeechError> {
        for step in &self.steps {
            match step {
                ScriptStep::Wait(duration) => {
                    tokio::select! {
                        _ = stop.stopped() => return Ok(()),
                        _ = tokio::time::sleep(*duration) => {}
                    }
                }
                ScriptStep::Say { text, is_final } => {
                    if stop.is_stopped() {
                        return Ok(());
                    }
                    debug!("Scripted fragment (final={}): {}", is_final, text);
                    let fragment = TranscriptFragment {
                        text: text.clone(),
                        is_final: *is_final,
                    };
                    if sender.send(fragment).await.is_err() {
                        return Ok(());
                    }
                }
                ScriptStep::Fail(error) => return Err(error.clone()),
            }
        }

        // Continuous recognition: stay open until told to stop.
        stop.stopped().await;
        Ok(())
    }
}
