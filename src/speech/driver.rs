//! # Capture Driver
//!
//! Carries out the [`CaptureEffect`]s produced by the voice state machine.
//!
//! ```text
//!  VoiceCapture ──effects──▶ CaptureDriver ──spawns──▶ recognizer task
//!       ▲                          │                    watchdog sleeps
//!       │                          │                         │
//!       └──── update() ◀── Action::Capture ◀─────────────────┘
//! ```
//!
//! Everything it spawns reports back through the event loop's action
//! channel, tagged with the session it belongs to. Cancelling is done with
//! `AbortHandle`s, so a cancelled watchdog never fires and an aborted
//! recognizer drops its resources right away.

use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::voice::{Capability, CaptureEffect, CaptureEvent, SessionId};
use crate::speech::{
    SpeechError, SpeechRecognizer, StopHandle, StopSignal, TranscriptFragment, stop_channel,
};

/// Size of the fragment channel between a recognizer and its forwarder.
const FRAGMENT_BUFFER: usize = 32;

struct ActiveRecognition {
    session: SessionId,
    stop: StopHandle,
    task: AbortHandle,
}

struct Watchdog {
    session: SessionId,
    task: AbortHandle,
}

impl Watchdog {
    fn cancel(self) {
        self.task.abort();
    }
}

pub struct CaptureDriver {
    recognizer: Arc<dyn SpeechRecognizer>,
    tx: mpsc::Sender<Action>,
    recognition: Option<ActiveRecognition>,
    silence: Option<Watchdog>,
    max_duration: Option<Watchdog>,
    processing: Option<Watchdog>,
}

impl CaptureDriver {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, tx: mpsc::Sender<Action>) -> Self {
        Self {
            recognizer,
            tx,
            recognition: None,
            silence: None,
            max_duration: None,
            processing: None,
        }
    }

    /// What the configured recognizer can do, for seeding the state machine.
    pub fn capability(&self) -> Capability {
        if self.recognizer.is_supported() {
            Capability::Supported {
                streaming: self.recognizer.is_streaming(),
            }
        } else {
            Capability::Unsupported
        }
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    pub fn is_recognizing(&self) -> bool {
        self.recognition.is_some()
    }

    pub fn has_armed_watchdogs(&self) -> bool {
        self.silence.is_some() || self.max_duration.is_some() || self.processing.is_some()
    }

    /// Must be called from within a tokio runtime.
    pub fn apply(&mut self, effects: Vec<CaptureEffect>) {
        for effect in effects {
            match effect {
                CaptureEffect::StartRecognition { session } => self.start(session),
                CaptureEffect::FinishRecognition { session } => {
                    if let Some(active) = self.recognition.as_ref().filter(|a| a.session == session)
                    {
                        debug!("Asking recognizer to finish session {session}");
                        active.stop.stop();
                    }
                }
                CaptureEffect::StopRecognition { session } => self.stop(session),
                CaptureEffect::ArmSilence {
                    session,
                    generation,
                    after,
                } => {
                    if let Some(previous) = self.silence.take() {
                        previous.cancel();
                    }
                    self.silence = Some(self.arm(
                        session,
                        after,
                        CaptureEvent::SilenceElapsed {
                            session,
                            generation,
                        },
                    ));
                }
                CaptureEffect::ArmMaxDuration { session, after } => {
                    if let Some(previous) = self.max_duration.take() {
                        previous.cancel();
                    }
                    self.max_duration = Some(self.arm(
                        session,
                        after,
                        CaptureEvent::MaxDurationElapsed { session },
                    ));
                }
                CaptureEffect::ArmProcessing { session, after } => {
                    if let Some(previous) = self.processing.take() {
                        previous.cancel();
                    }
                    self.processing = Some(self.arm(
                        session,
                        after,
                        CaptureEvent::ProcessingElapsed { session },
                    ));
                }
                CaptureEffect::CancelWatchdogs { session } => self.cancel_watchdogs(session),
                CaptureEffect::EmitMessage(_) | CaptureEffect::Notify(_) => {
                    // Applied to the App by update(); nothing to run.
                    debug!("Driver skipping app-level capture effect");
                }
            }
        }
    }

    /// Cancel everything regardless of session. Used when the panel goes away.
    pub fn teardown(&mut self) {
        if let Some(active) = self.recognition.take() {
            info!("Tearing down recognizer for session {}", active.session);
            active.stop.stop();
            active.task.abort();
        }
        for watchdog in [
            self.silence.take(),
            self.max_duration.take(),
            self.processing.take(),
        ]
        .into_iter()
        .flatten()
        {
            watchdog.cancel();
        }
    }

    fn start(&mut self, session: SessionId) {
        if let Some(previous) = self.recognition.take() {
            warn!(
                "Starting session {session} while {} still active, stopping it",
                previous.session
            );
            previous.stop.stop();
            previous.task.abort();
        }

        info!(
            "Spawning recognizer '{}' for session {session}",
            self.recognizer.name()
        );
        let (stop, signal) = stop_channel();
        let recognizer = self.recognizer.clone();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let event = match run_recognition(recognizer, session, signal, &tx).await {
                Ok(()) => CaptureEvent::RecognitionEnded { session },
                Err(error) => CaptureEvent::RecognitionFailed { session, error },
            };
            send(&tx, event);
        })
        .abort_handle();

        self.recognition = Some(ActiveRecognition {
            session,
            stop,
            task,
        });
    }

    fn stop(&mut self, session: SessionId) {
        match self.recognition.take() {
            Some(active) if active.session == session => {
                debug!("Stopping recognizer for session {session}");
                active.stop.stop();
                active.task.abort();
            }
            other => self.recognition = other,
        }
    }

    fn arm(&self, session: SessionId, after: Duration, event: CaptureEvent) -> Watchdog {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            send(&tx, event);
        })
        .abort_handle();
        Watchdog { session, task }
    }

    fn cancel_watchdogs(&mut self, session: SessionId) {
        for slot in [
            &mut self.silence,
            &mut self.max_duration,
            &mut self.processing,
        ] {
            if let Some(watchdog) = slot.take() {
                if watchdog.session == session {
                    watchdog.cancel();
                } else {
                    *slot = Some(watchdog);
                }
            }
        }
    }
}

impl Drop for CaptureDriver {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Ask for permission, then run the recognizer while forwarding its
/// fragments to the event loop.
async fn run_recognition(
    recognizer: Arc<dyn SpeechRecognizer>,
    session: SessionId,
    signal: StopSignal,
    tx: &mpsc::Sender<Action>,
) -> Result<(), SpeechError> {
    recognizer.request_permission().await?;

    let (fragment_tx, mut fragment_rx) =
        tokio::sync::mpsc::channel::<TranscriptFragment>(FRAGMENT_BUFFER);
    let forward = async {
        while let Some(fragment) = fragment_rx.recv().await {
            send(
                tx,
                CaptureEvent::Fragment {
                    session,
                    text: fragment.text,
                    is_final: fragment.is_final,
                },
            );
        }
    };

    let (result, ()) = tokio::join!(recognizer.recognize(fragment_tx, signal), forward);
    result
}

/// Clock used to stamp capture events. Follows the tokio clock, so paused
/// time in tests moves it too.
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

fn send(tx: &mpsc::Sender<Action>, event: CaptureEvent) {
    if tx.send(Action::Capture(event, now())).is_err() {
        warn!("Dropped capture event: event loop receiver is gone");
    }
}
