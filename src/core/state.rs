//! # Application State
//!
//! Core business state for vidchat. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── video: Option<VideoRef>      // set once by the submission form
//! ├── messages: MessageLog         // append-only chat history
//! ├── voice: VoiceCapture          // recording lifecycle
//! ├── notices: VecDeque<Notice>    // toasts waiting to be shown
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes go through `update(state, action)` in action.rs.

use std::collections::VecDeque;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::message::{Message, MessageLog};
use crate::core::notice::Notice;
use crate::core::video::VideoRef;
use crate::core::voice::{Capability, VoiceCapture, VoiceSettings};

/// Oldest notices are dropped beyond this many.
pub const MAX_NOTICES: usize = 4;

pub struct App {
    pub video: Option<VideoRef>,
    pub messages: MessageLog,
    pub voice: VoiceCapture,
    pub notices: VecDeque<Notice>,
    pub status_message: String,
}

impl App {
    pub fn new(settings: VoiceSettings, capability: Capability) -> Self {
        Self {
            video: None,
            messages: MessageLog::new(),
            voice: VoiceCapture::new(settings, capability),
            notices: VecDeque::new(),
            status_message: String::from("Paste a video URL to get started"),
        }
    }

    pub fn from_config(config: &ResolvedConfig, capability: Capability) -> Self {
        Self::new(config.voice, capability)
    }

    /// Accepts the first submission only; the video can't be changed after.
    pub fn submit_video(&mut self, url: &str) -> bool {
        if self.video.is_some() {
            warn!("Ignoring video submission, a video is already loaded");
            return false;
        }
        let video = VideoRef::from_url(url);
        info!("Video submitted: token={:?}", video.token);
        self.video = Some(video);
        true
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn notify(&mut self, notice: Notice) {
        info!("Notice: {} ({})", notice.title, notice.description);
        if self.notices.len() >= MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// The form is shown until a video has been submitted.
    pub fn shows_form(&self) -> bool {
        self.video.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::streaming_app;

    #[test]
    fn test_app_new_defaults() {
        let app = streaming_app();
        assert!(app.video.is_none());
        assert!(app.messages.is_empty());
        assert!(app.notices.is_empty());
        assert!(app.shows_form());
    }

    #[test]
    fn test_submit_video_accepts_only_first() {
        let mut app = streaming_app();
        assert!(app.submit_video("https://youtu.be/XYZ789"));
        assert!(!app.submit_video("https://www.youtube.com/watch?v=ABC123"));
        assert_eq!(app.video.unwrap().token, "XYZ789");
    }

    #[test]
    fn test_notice_queue_is_bounded() {
        let mut app = streaming_app();
        for i in 0..MAX_NOTICES + 2 {
            app.notify(Notice::info(format!("n{i}"), ""));
        }
        assert_eq!(app.notices.len(), MAX_NOTICES);
        assert_eq!(app.notices.front().unwrap().title, "n2");
    }
}
