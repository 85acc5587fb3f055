//! # Speech
//!
//! Everything that touches audio or a speech backend. The capture state
//! machine in [`crate::core::voice`] decides *what* should happen; this module
//! makes it happen.
//!
//! - [`recognizer`]: the `SpeechRecognizer` trait and its stop signal
//! - [`transcriber`]: the `Transcriber` trait for batch speech-to-text
//! - [`providers`]: recognizer implementations
//! - [`transcribers`]: transcriber implementations
//! - [`driver`]: runs capture effects as tokio tasks

pub mod driver;
pub mod providers;
pub mod recognizer;
pub mod transcriber;
pub mod transcribers;
pub mod wav;

pub use driver::CaptureDriver;
pub use recognizer::{
    SpeechError, SpeechRecognizer, StopHandle, StopSignal, TranscriptFragment, stop_channel,
};
pub use transcriber::{TranscribeError, Transcriber};
