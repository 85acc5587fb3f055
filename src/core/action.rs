//! # Actions
//!
//! Everything that can happen in vidchat becomes an `Action`.
//! User submits the form? That's `Action::SubmitVideo(url)`.
//! A watchdog fires? That's `Action::Capture(CaptureEvent::SilenceElapsed { .. }, at)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller must do.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Capture effects that only touch the app (new message, new notice) are
//! applied right here. The rest go back to the caller for the capture driver.

use std::time::Instant;

use log::{debug, info};

use crate::core::message::Message;
use crate::core::state::App;
use crate::core::voice::{CaptureEffect, CaptureEvent};

#[derive(Debug, Clone)]
pub enum Action {
    SubmitVideo(String),
    AppendMessage(Message),
    /// A capture event and the instant it happened.
    Capture(CaptureEvent, Instant),
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Work for the capture driver.
    Capture(Vec<CaptureEffect>),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitVideo(url) => {
            if app.submit_video(&url) {
                if let Some(video) = app.video.as_ref() {
                    app.status_message = if video.token.is_empty() {
                        "No video identifier found in that URL".to_string()
                    } else {
                        format!("Watching {}", video.token)
                    };
                }
            }
            Effect::None
        }
        Action::AppendMessage(message) => {
            app.append_message(message);
            Effect::None
        }
        Action::Capture(event, at) => {
            debug!("Capture event: {:?}", event);
            let effects = app.voice.handle(event, at);
            let mut driver_work = Vec::with_capacity(effects.len());
            for effect in effects {
                match effect {
                    CaptureEffect::EmitMessage(message) => {
                        info!("Voice question added to the chat");
                        app.append_message(message);
                    }
                    CaptureEffect::Notify(notice) => app.notify(notice),
                    other => driver_work.push(other),
                }
            }
            if driver_work.is_empty() {
                Effect::None
            } else {
                Effect::Capture(driver_work)
            }
        }
        Action::DismissNotice => {
            app.notices.pop_front();
            Effect::None
        }
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::core::notice::Notice;
    use crate::core::voice::CaptureState;
    use crate::test_support::{batch_app, streaming_app, unsupported_app};
    use chrono::Local;
    use std::time::Duration;

    fn capture(app: &mut App, event: CaptureEvent, at: Instant) -> Effect {
        update(app, Action::Capture(event, at))
    }

    #[test]
    fn submit_video_sets_video_once() {
        let mut app = streaming_app();
        assert!(app.shows_form());

        update(&mut app, Action::SubmitVideo("https://www.youtube.com/watch?v=ABC123".into()));
        assert!(!app.shows_form());
        assert_eq!(app.video.as_ref().unwrap().token, "ABC123");
        assert_eq!(app.status_message, "Watching ABC123");

        update(&mut app, Action::SubmitVideo("https://youtu.be/XYZ789".into()));
        assert_eq!(app.video.as_ref().unwrap().token, "ABC123");
    }

    #[test]
    fn submit_video_without_token_still_shows_video_view() {
        let mut app = streaming_app();
        update(&mut app, Action::SubmitVideo("not a url".into()));
        assert!(!app.shows_form());
        assert_eq!(app.video.as_ref().unwrap().token, "");
        assert_eq!(app.status_message, "No video identifier found in that URL");
    }

    #[test]
    fn append_message_preserves_order() {
        let mut app = streaming_app();
        for text in ["first", "second", "third"] {
            update(&mut app, Action::AppendMessage(Message::user(text, Local::now())));
        }
        let contents: Vec<&str> = app.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn start_recording_hands_effects_to_driver() {
        let mut app = streaming_app();
        let effect = capture(&mut app, CaptureEvent::Toggle, Instant::now());
        assert_eq!(app.voice.state(), CaptureState::Recording);
        match effect {
            Effect::Capture(effects) => {
                assert_eq!(effects.len(), 3);
                assert!(matches!(effects[0], CaptureEffect::StartRecognition { .. }));
            }
            other => panic!("expected capture effects, got {other:?}"),
        }
    }

    #[test]
    fn completed_recording_appends_user_message() {
        let mut app = streaming_app();
        let t0 = Instant::now();
        capture(&mut app, CaptureEvent::Toggle, t0);
        let session = app.voice.session_id().unwrap();
        capture(
            &mut app,
            CaptureEvent::Fragment {
                session,
                text: "what is this".into(),
                is_final: true,
            },
            t0 + Duration::from_secs(1),
        );
        let effect = capture(&mut app, CaptureEvent::Toggle, t0 + Duration::from_secs(2));

        assert_eq!(app.messages.len(), 1);
        let message = app.messages.last().unwrap();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "what is this");
        // Message effect was consumed; only driver work remains.
        match effect {
            Effect::Capture(effects) => assert!(
                effects
                    .iter()
                    .all(|e| !matches!(e, CaptureEffect::EmitMessage(_)))
            ),
            other => panic!("expected capture effects, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_capability_queues_one_notice() {
        let mut app = unsupported_app();
        let t0 = Instant::now();
        capture(&mut app, CaptureEvent::Toggle, t0);
        let effect = capture(&mut app, CaptureEvent::Toggle, t0 + Duration::from_secs(1));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.notices.len(), 1);
        assert_eq!(app.voice.state(), CaptureState::Disabled);
    }

    #[test]
    fn batch_recording_waits_for_transcript() {
        let mut app = batch_app();
        let t0 = Instant::now();
        capture(&mut app, CaptureEvent::Toggle, t0);
        let session = app.voice.session_id().unwrap();
        capture(&mut app, CaptureEvent::Toggle, t0 + Duration::from_secs(3));
        assert_eq!(app.voice.state(), CaptureState::Processing);
        assert!(app.messages.is_empty());

        capture(
            &mut app,
            CaptureEvent::Fragment {
                session,
                text: "simulated".into(),
                is_final: true,
            },
            t0 + Duration::from_secs(4),
        );
        capture(
            &mut app,
            CaptureEvent::RecognitionEnded { session },
            t0 + Duration::from_secs(4),
        );
        assert_eq!(app.messages.last().unwrap().content, "simulated");
        assert_eq!(app.voice.state(), CaptureState::Idle);
    }

    #[test]
    fn dismiss_notice_pops_oldest() {
        let mut app = streaming_app();
        app.notify(Notice::info("one", ""));
        app.notify(Notice::info("two", ""));
        update(&mut app, Action::DismissNotice);
        assert_eq!(app.notices.front().unwrap().title, "two");
        update(&mut app, Action::DismissNotice);
        update(&mut app, Action::DismissNotice);
        assert!(app.notices.is_empty());
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = streaming_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
