//! vidchat library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod speech;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Speech recognizer selectable from the command line.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Recognizer {
    /// Simulated live recognition of a configured utterance.
    #[default]
    Scripted,
    /// Record, then send the audio to the configured transcriber.
    Transcribe,
    /// Voice input switched off.
    None,
}

impl Recognizer {
    pub fn config_name(&self) -> &'static str {
        match self {
            Recognizer::Scripted => "scripted",
            Recognizer::Transcribe => "transcribe",
            Recognizer::None => "none",
        }
    }
}
