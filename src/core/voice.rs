//! # Voice Capture
//!
//! The recording lifecycle of the chat panel, as a pure state machine.
//!
//! ```text
//!            Toggle                     stop (Toggle / silence / max duration / recognizer ended)
//!   Idle ──────────────▶ Recording ─────────────────────────────────────────────┐
//!    ▲                      │ error                                             │
//!    │                      ▼                                streaming          ▼  batch
//!    └──────────────────── Idle ◀───────── message if transcript ◀──────── Processing
//!                                                                 (RecognitionEnded / timeout)
//! ```
//!
//! `VoiceCapture::handle` takes an event and the instant it happened, mutates
//! the session, and returns the effects the caller must carry out: start or
//! stop the recognizer, arm or cancel watchdogs, emit a message, raise a notice.
//! No timers, tasks or I/O live here, so every transition is testable with
//! hand-made instants.
//!
//! Every event that comes from the outside world carries the session id it
//! belongs to. Events for a session that is no longer active are dropped,
//! which is what makes a stopped recognizer inert even if it still has
//! fragments in flight. The silence watchdog is re-armed on every fragment;
//! each arm gets a new generation number and only the latest one counts.
//! Batch recognizers get no silence watchdog: they are push-to-toggle and
//! report nothing until stopped, so a batch recording that comes back empty
//! is always "no speech".

use std::time::{Duration, Instant};

use chrono::Local;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::message::Message;
use crate::core::notice::Notice;
use crate::speech::SpeechError;

pub type SessionId = Uuid;

pub const DEFAULT_SILENCE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_PROCESSING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSettings {
    /// Recording ends after this long without a fragment.
    pub silence_timeout: Duration,
    /// Hard cap on a recording, speech or not.
    pub max_duration: Duration,
    /// How long a batch recognizer may take to deliver its transcript.
    pub processing_timeout: Duration,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            silence_timeout: DEFAULT_SILENCE_TIMEOUT,
            max_duration: DEFAULT_MAX_DURATION,
            processing_timeout: DEFAULT_PROCESSING_TIMEOUT,
        }
    }
}

/// What the runtime offers for speech capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Streaming recognizers deliver fragments live; batch ones only after stop.
    Supported { streaming: bool },
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Processing,
    /// Capability missing. Toggling does nothing until re-evaluated.
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The record button: start when idle, stop when recording.
    Toggle,
    Fragment {
        session: SessionId,
        text: String,
        is_final: bool,
    },
    RecognitionFailed {
        session: SessionId,
        error: SpeechError,
    },
    /// The recognizer finished on its own (or after being asked to).
    RecognitionEnded { session: SessionId },
    SilenceElapsed { session: SessionId, generation: u64 },
    MaxDurationElapsed { session: SessionId },
    ProcessingElapsed { session: SessionId },
    /// The panel is going away.
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEffect {
    StartRecognition { session: SessionId },
    /// Stop capturing but let the recognizer deliver its transcript.
    FinishRecognition { session: SessionId },
    /// Drop the recognizer and release its resources.
    StopRecognition { session: SessionId },
    /// Replaces any previously armed silence watchdog.
    ArmSilence {
        session: SessionId,
        generation: u64,
        after: Duration,
    },
    ArmMaxDuration { session: SessionId, after: Duration },
    ArmProcessing { session: SessionId, after: Duration },
    CancelWatchdogs { session: SessionId },
    EmitMessage(Message),
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    UserStop,
    Silence,
    MaxDuration,
    RecognizerEnded,
}

#[derive(Debug, Clone)]
struct RecordingSession {
    id: SessionId,
    started_at: Instant,
    ended_at: Option<Instant>,
    last_speech_at: Instant,
    transcript: String,
    silence_generation: u64,
}

pub struct VoiceCapture {
    settings: VoiceSettings,
    capability: Capability,
    state: CaptureState,
    session: Option<RecordingSession>,
}

impl VoiceCapture {
    pub fn new(settings: VoiceSettings, capability: Capability) -> Self {
        Self {
            settings,
            capability,
            state: CaptureState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Live best guess for the current recording, empty when idle.
    pub fn transcript(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.transcript.as_str())
            .unwrap_or("")
    }

    /// Time recorded so far. Frozen once recording stops.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.session
            .as_ref()
            .map(|s| s.ended_at.unwrap_or(now).saturating_duration_since(s.started_at))
            .unwrap_or_default()
    }

    /// Elapsed time as a share of the maximum duration, clamped to 0..=100.
    pub fn progress_percent(&self, now: Instant) -> u16 {
        let max = self.settings.max_duration.as_secs_f64();
        if max <= 0.0 {
            return 100;
        }
        let pct = self.elapsed(now).as_secs_f64() / max * 100.0;
        pct.clamp(0.0, 100.0) as u16
    }

    /// Re-check the capability, e.g. after the user changed their setup.
    ///
    /// The terminal app settles its capability once at startup, so nothing
    /// in it calls this; it is for embedders whose recognizer can appear or
    /// disappear at runtime (a device plugged in, permission granted later).
    pub fn reevaluate_capability(&mut self, capability: Capability) {
        self.capability = capability;
        match (self.state, capability) {
            (CaptureState::Disabled, Capability::Supported { .. }) => {
                info!("Speech capability available again");
                self.state = CaptureState::Idle;
            }
            (CaptureState::Idle, Capability::Unsupported) => {
                self.state = CaptureState::Disabled;
            }
            _ => {}
        }
    }

    pub fn handle(&mut self, event: CaptureEvent, now: Instant) -> Vec<CaptureEffect> {
        let mut effects = Vec::new();
        match event {
            CaptureEvent::Toggle => self.toggle(now, &mut effects),
            CaptureEvent::Fragment {
                session,
                text,
                is_final,
            } => self.fragment(session, text, is_final, now, &mut effects),
            CaptureEvent::SilenceElapsed {
                session,
                generation,
            } => {
                let current = self
                    .active(session)
                    .map(|s| s.silence_generation == generation)
                    .unwrap_or(false);
                if current && self.state == CaptureState::Recording {
                    debug!("Silence watchdog fired (generation {generation})");
                    self.end_recording(EndReason::Silence, now, &mut effects);
                }
            }
            CaptureEvent::MaxDurationElapsed { session } => {
                if self.active(session).is_some() && self.state == CaptureState::Recording {
                    debug!("Max duration watchdog fired");
                    self.end_recording(EndReason::MaxDuration, now, &mut effects);
                }
            }
            CaptureEvent::RecognitionEnded { session } => {
                if self.active(session).is_some() {
                    match self.state {
                        CaptureState::Recording => {
                            self.end_recording(EndReason::RecognizerEnded, now, &mut effects)
                        }
                        CaptureState::Processing => self.finalize(now, &mut effects),
                        _ => {}
                    }
                }
            }
            CaptureEvent::RecognitionFailed { session, error } => {
                if self.active(session).is_some() {
                    self.fail(error, &mut effects);
                }
            }
            CaptureEvent::ProcessingElapsed { session } => {
                if self.active(session).is_some() && self.state == CaptureState::Processing {
                    warn!("Transcript did not arrive in time");
                    effects.push(CaptureEffect::StopRecognition { session });
                    effects.push(CaptureEffect::Notify(Notice::destructive(
                        "Transcription timed out",
                        "No transcript arrived for your recording. Try again.",
                    )));
                    self.reset();
                }
            }
            CaptureEvent::Teardown => {
                if let Some(session) = self.session.take() {
                    info!("Tearing down active recording {}", session.id);
                    effects.push(CaptureEffect::CancelWatchdogs {
                        session: session.id,
                    });
                    effects.push(CaptureEffect::StopRecognition {
                        session: session.id,
                    });
                }
                if self.state != CaptureState::Disabled {
                    self.state = CaptureState::Idle;
                }
            }
        }
        effects
    }

    fn active(&self, session: SessionId) -> Option<&RecordingSession> {
        self.session.as_ref().filter(|s| s.id == session)
    }

    fn toggle(&mut self, now: Instant, effects: &mut Vec<CaptureEffect>) {
        match self.state {
            CaptureState::Idle => match self.capability {
                Capability::Unsupported => {
                    warn!("Recording refused: speech capture unsupported");
                    self.state = CaptureState::Disabled;
                    effects.push(CaptureEffect::Notify(unsupported_notice()));
                }
                Capability::Supported { .. } => self.start(now, effects),
            },
            CaptureState::Recording => self.end_recording(EndReason::UserStop, now, effects),
            CaptureState::Processing => debug!("Toggle ignored while processing"),
            CaptureState::Disabled => debug!("Toggle ignored: speech capture disabled"),
        }
    }

    fn start(&mut self, now: Instant, effects: &mut Vec<CaptureEffect>) {
        let id = Uuid::new_v4();
        info!("Recording started (session {id})");
        self.session = Some(RecordingSession {
            id,
            started_at: now,
            ended_at: None,
            last_speech_at: now,
            transcript: String::new(),
            silence_generation: 0,
        });
        self.state = CaptureState::Recording;
        effects.push(CaptureEffect::StartRecognition { session: id });
        // Batch recognizers send nothing until stopped, so only the
        // max-duration cap and the user bound them.
        if matches!(self.capability, Capability::Supported { streaming: true }) {
            effects.push(CaptureEffect::ArmSilence {
                session: id,
                generation: 0,
                after: self.settings.silence_timeout,
            });
        }
        effects.push(CaptureEffect::ArmMaxDuration {
            session: id,
            after: self.settings.max_duration,
        });
    }

    fn fragment(
        &mut self,
        session: SessionId,
        text: String,
        is_final: bool,
        now: Instant,
        effects: &mut Vec<CaptureEffect>,
    ) {
        let state = self.state;
        let silence_timeout = self.settings.silence_timeout;
        let Some(active) = self.session.as_mut().filter(|s| s.id == session) else {
            debug!("Dropping fragment for inactive session {session}");
            return;
        };
        match state {
            CaptureState::Recording => {
                debug!("Fragment (final={is_final}): {text}");
                active.transcript = text;
                active.last_speech_at = now;
                active.silence_generation += 1;
                effects.push(CaptureEffect::ArmSilence {
                    session,
                    generation: active.silence_generation,
                    after: silence_timeout,
                });
            }
            CaptureState::Processing => {
                debug!("Transcript delivered after stop (final={is_final})");
                active.transcript = text;
            }
            _ => {}
        }
    }

    fn end_recording(&mut self, reason: EndReason, now: Instant, effects: &mut Vec<CaptureEffect>) {
        let streaming = matches!(self.capability, Capability::Supported { streaming: true });
        let processing_timeout = self.settings.processing_timeout;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        info!("Recording {} ended: {:?}", session.id, reason);
        session.ended_at = Some(now);
        let id = session.id;
        effects.push(CaptureEffect::CancelWatchdogs { session: id });

        if streaming {
            effects.push(CaptureEffect::StopRecognition { session: id });
            self.finalize(now, effects);
        } else {
            self.state = CaptureState::Processing;
            effects.push(CaptureEffect::FinishRecognition { session: id });
            effects.push(CaptureEffect::ArmProcessing {
                session: id,
                after: processing_timeout,
            });
        }
    }

    /// Turn the finished session into a message, or a notice if nothing was said.
    fn finalize(&mut self, now: Instant, effects: &mut Vec<CaptureEffect>) {
        let was_processing = self.state == CaptureState::Processing;
        let Some(session) = self.session.take() else {
            return;
        };
        if was_processing {
            effects.push(CaptureEffect::CancelWatchdogs {
                session: session.id,
            });
            effects.push(CaptureEffect::StopRecognition {
                session: session.id,
            });
        }

        if !session.transcript.trim().is_empty() {
            info!(
                "Recording {} produced a {}-char message",
                session.id,
                session.transcript.len()
            );
            effects.push(CaptureEffect::EmitMessage(Message::user(
                session.transcript,
                Local::now(),
            )));
        } else if was_processing
            || now.saturating_duration_since(session.last_speech_at)
                >= self.settings.silence_timeout
        {
            effects.push(CaptureEffect::Notify(Notice::info(
                "No speech detected",
                "Nothing was heard. Press the record key and try again.",
            )));
        }
        self.state = CaptureState::Idle;
    }

    fn fail(&mut self, error: SpeechError, effects: &mut Vec<CaptureEffect>) {
        warn!("Recording failed: {error}");
        if let Some(session) = self.session.take() {
            effects.push(CaptureEffect::CancelWatchdogs {
                session: session.id,
            });
            effects.push(CaptureEffect::StopRecognition {
                session: session.id,
            });
        }
        effects.push(CaptureEffect::Notify(error_notice(&error)));
        if error == SpeechError::Unsupported {
            self.capability = Capability::Unsupported;
            self.state = CaptureState::Disabled;
        } else {
            self.state = CaptureState::Idle;
        }
    }

    fn reset(&mut self) {
        self.session = None;
        self.state = CaptureState::Idle;
    }
}

fn unsupported_notice() -> Notice {
    Notice::destructive(
        "Speech recognition unavailable",
        "Voice input isn't supported by the configured speech backend.",
    )
}

fn error_notice(error: &SpeechError) -> Notice {
    match error {
        SpeechError::Unsupported => unsupported_notice(),
        SpeechError::PermissionDenied(reason) => {
            Notice::destructive("Microphone access denied", reason.clone())
        }
        SpeechError::Recognition(reason) => {
            Notice::destructive("Speech recognition error", reason.clone())
        }
        SpeechError::Transcription(e) => Notice::destructive("Transcription failed", e.to_string()),
    }
}
