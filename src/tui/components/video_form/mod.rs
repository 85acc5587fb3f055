//! # VideoForm Component
//!
//! The first screen: a single-line field for the video URL.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete)
//! - Cursor movement, including word jumps over URL separators
//! - Horizontal scrolling when the URL is wider than the field
//! - Submission (Enter)
//!
//! Blank submissions are ignored. Anything else is emitted as typed, without
//! validation, and the field is cleared.

mod editing;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use editing::{
    column_of, next_char_boundary, next_word_boundary, prev_char_boundary, prev_word_boundary,
    visible_slice,
};

const FIELD_MAX_WIDTH: u16 = 72;
const PLACEHOLDER: &str = "https://www.youtube.com/watch?v=...";

/// High-level events emitted by the VideoForm
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User submitted a non-blank URL (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct VideoForm {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// Display columns scrolled off the left edge
    scroll: usize,
}

impl Default for VideoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoForm {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn submit(&mut self) -> Option<FormEvent> {
        if self.buffer.trim().is_empty() {
            return None;
        }
        let url = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.scroll = 0;
        Some(FormEvent::Submit(url))
    }

    fn insert_str(&mut self, text: &str) -> Option<FormEvent> {
        // URLs are single line
        let clean: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if clean.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        Some(FormEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<FormEvent> {
        (pos != self.cursor).then(|| {
            self.cursor = pos;
            FormEvent::ContentChanged
        })
    }

    /// Keep the cursor column inside the visible window.
    fn update_scroll(&mut self, inner_width: usize) {
        let col = column_of(&self.buffer, self.cursor);
        if col < self.scroll {
            self.scroll = col;
        } else if inner_width > 0 && col >= self.scroll + inner_width {
            self.scroll = col + 1 - inner_width;
        }
    }

    fn field_area(area: Rect) -> [Rect; 4] {
        let width = FIELD_MAX_WIDTH.min(area.width.saturating_sub(4)).max(10);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        Layout::vertical([
            Constraint::Length(1), // heading
            Constraint::Length(1), // spacer
            Constraint::Length(3), // field
            Constraint::Length(1), // hint
        ])
        .flex(Flex::Center)
        .areas(column)
    }
}

impl Component for VideoForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [heading_area, _, field_area, hint_area] = Self::field_area(area);

        let heading = Paragraph::new(Line::from(Span::styled(
            "Which video are we watching?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(heading, heading_area);

        let inner_width = field_area.width.saturating_sub(2) as usize;
        self.update_scroll(inner_width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Video URL");
        let content = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                visible_slice(&self.buffer, self.scroll, inner_width),
                Style::default().fg(Color::Green),
            ))
        };
        frame.render_widget(Paragraph::new(content).block(block), field_area);

        let hint = Paragraph::new(Line::from(Span::styled(
            "Enter to load · Ctrl+C to quit",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);

        let col = column_of(&self.buffer, self.cursor).saturating_sub(self.scroll);
        let cursor_x = field_area.x + 1 + col as u16;
        frame.set_cursor_position((cursor_x, field_area.y + 1));
    }
}

impl EventHandler for VideoForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Paste(text) => self.insert_str(text),
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(FormEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.move_to(next_char_boundary(&self.buffer, self.cursor))
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => self.move_to(0),
            TuiEvent::CursorEnd => self.move_to(self.buffer.len()),
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(&self.buffer, self.cursor)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(&self.buffer, self.cursor)),
            TuiEvent::Submit => self.submit(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(form: &mut VideoForm, s: &str) {
        for c in s.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut form = VideoForm::new();
        type_str(&mut form, "abc");
        assert_eq!(form.buffer, "abc");
        assert_eq!(
            form.handle_event(&TuiEvent::Backspace),
            Some(FormEvent::ContentChanged)
        );
        assert_eq!(form.buffer, "ab");
    }

    #[test]
    fn test_submit_emits_raw_url_and_clears() {
        let mut form = VideoForm::new();
        type_str(&mut form, " https://youtu.be/XYZ789 ");
        assert_eq!(
            form.handle_event(&TuiEvent::Submit),
            Some(FormEvent::Submit(" https://youtu.be/XYZ789 ".to_string()))
        );
        assert!(form.buffer.is_empty());
        assert_eq!(form.cursor(), 0);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut form = VideoForm::new();
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        type_str(&mut form, "   ");
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(form.buffer, "   ");
    }

    #[test]
    fn test_unvalidated_text_is_submitted() {
        let mut form = VideoForm::new();
        type_str(&mut form, "not a url");
        assert_eq!(
            form.handle_event(&TuiEvent::Submit),
            Some(FormEvent::Submit("not a url".to_string()))
        );
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut form = VideoForm::new();
        form.handle_event(&TuiEvent::Paste(
            "https://www.youtube.com/\nwatch?v=ABC123\r\n".into(),
        ));
        assert_eq!(form.buffer, "https://www.youtube.com/watch?v=ABC123");
        assert_eq!(form.cursor(), form.buffer.len());
    }

    #[test]
    fn test_cursor_editing_in_the_middle() {
        let mut form = VideoForm::new();
        type_str(&mut form, "ac");
        form.handle_event(&TuiEvent::CursorLeft);
        type_str(&mut form, "b");
        assert_eq!(form.buffer, "abc");

        form.handle_event(&TuiEvent::CursorHome);
        form.handle_event(&TuiEvent::Delete);
        assert_eq!(form.buffer, "bc");
        assert_eq!(form.handle_event(&TuiEvent::CursorLeft), None);

        form.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(form.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(form.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_word_jumps() {
        let mut form = VideoForm::new();
        type_str(&mut form, "https://youtu.be/XYZ789");
        form.handle_event(&TuiEvent::WordLeft);
        assert_eq!(&form.buffer[form.cursor()..], "XYZ789");
        form.handle_event(&TuiEvent::WordLeft);
        assert_eq!(&form.buffer[form.cursor()..], "be/XYZ789");
        form.handle_event(&TuiEvent::WordRight);
        assert_eq!(&form.buffer[form.cursor()..], "/XYZ789");
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = VideoForm::new();
        terminal.draw(|f| form.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Video URL"));
        assert!(text.contains("watch?v=..."));
        assert!(text.contains("Which video are we watching?"));
    }

    #[test]
    fn test_long_url_scrolls_to_keep_cursor_visible() {
        let backend = TestBackend::new(30, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = VideoForm::new();
        type_str(&mut form, "https://www.youtube.com/watch?v=END999");
        terminal.draw(|f| form.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("END999"));
        assert!(!text.contains("https://www"));

        form.handle_event(&TuiEvent::CursorHome);
        terminal.draw(|f| form.render(f, f.area())).unwrap();
        assert!(screen_text(&terminal).contains("https://"));
    }
}
