//! # ChatPanel Component
//!
//! The conversational panel: message history on top, voice controls below.
//! Transient; composes `MessageList` and `CaptureBar` each frame.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, BorderType};

use crate::core::message::MessageLog;
use crate::core::voice::VoiceCapture;
use crate::tui::component::Component;
use crate::tui::components::capture_bar::{CAPTURE_BAR_HEIGHT, CaptureBar};
use crate::tui::components::message_list::{MessageList, MessageListState};

pub struct ChatPanel<'a> {
    pub list_state: &'a mut MessageListState,
    pub messages: &'a MessageLog,
    pub voice: &'a VoiceCapture,
    pub now: Instant,
    pub pulse: f32,
}

impl<'a> Component for ChatPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!("Chat ({})", self.messages.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, bar_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(CAPTURE_BAR_HEIGHT),
        ])
        .areas(inner);

        MessageList::new(&mut *self.list_state, self.messages).render(frame, list_area);

        let mut bar = CaptureBar {
            state: self.voice.state(),
            progress: self.voice.progress_percent(self.now),
            elapsed: self.voice.elapsed(self.now),
            max_duration: self.voice.settings().max_duration,
            transcript: self.voice.transcript(),
            pulse: self.pulse,
        };
        bar.render(frame, bar_area);
    }
}
