//! Capture-then-transcribe recognition.
//!
//! Records audio for as long as the session runs, and only after the stop
//! signal hands the whole recording to a [`Transcriber`]. The session goes
//! through the `Processing` state while the transcriber works.
//!
//! There is no microphone backend in this build: capture produces silent
//! 16 kHz frames at real-time pace, so the recording has the right length and
//! shape for the transcriber.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::mpsc::Sender;

use crate::speech::wav::encode_pcm16_mono;
use crate::speech::{SpeechError, SpeechRecognizer, StopSignal, Transcriber, TranscriptFragment};

pub const CAPTURE_SAMPLE_RATE: u32 = 16_000;
const FRAME_DURATION: Duration = Duration::from_millis(100);

pub struct TranscribingRecognizer {
    transcriber: Arc<dyn Transcriber>,
    sample_rate: u32,
}

impl TranscribingRecognizer {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            sample_rate: CAPTURE_SAMPLE_RATE,
        }
    }

    fn samples_per_frame(&self) -> usize {
        (self.sample_rate as u64 * FRAME_DURATION.as_millis() as u64 / 1000) as usize
    }
}

#[async_trait]
impl SpeechRecognizer for TranscribingRecognizer {
    fn name(&self) -> &str {
        "transcribe"
    }

    fn is_streaming(&self) -> bool {
        false
    }

    async fn recognize(
        &self,
        sender: Sender<TranscriptFragment>,
        mut stop: StopSignal,
    ) -> Result<(), SpeechError> {
        let mut samples: Vec<i16> = Vec::new();
        let mut ticker = tokio::time::interval(FRAME_DURATION);
        let frame_len = self.samples_per_frame();

        loop {
            tokio::select! {
                _ = stop.stopped() => break,
                _ = ticker.tick() => samples.resize(samples.len() + frame_len, 0),
            }
        }

        let seconds = samples.len() as f32 / self.sample_rate as f32;
        info!(
            "Captured {:.1}s of audio, sending to {} transcriber",
            seconds,
            self.transcriber.name()
        );

        let wav = encode_pcm16_mono(&samples, self.sample_rate);
        let text = self.transcriber.transcribe(&wav).await?;
        debug!("Transcription returned {} chars", text.len());

        if !text.trim().is_empty() {
            // Receiver gone means the session was torn down; nothing to report.
            let _ = sender.send(TranscriptFragment::final_(text)).await;
        }
        Ok(())
    }
}
