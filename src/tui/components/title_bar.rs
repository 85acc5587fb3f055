//! # TitleBar Component
//!
//! Top status bar: app name, the active speech recognizer, and the status
//! message from the App.
//!
//! Stateless. All fields are props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("scripted".into(), app.status_message.clone(), false);
//! title_bar.render(frame, title_area);
//! ```
//!
//! A red "● REC" marker is appended while a recording is running, so the
//! state is visible even when the chat panel is narrow.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Name of the speech recognizer (e.g. "scripted")
    pub recognizer: String,
    /// Status message (e.g. "Watching ABC123")
    pub status_message: String,
    pub is_recording: bool,
}

impl TitleBar {
    pub fn new(recognizer: String, status_message: String, is_recording: bool) -> Self {
        Self {
            recognizer,
            status_message,
            is_recording,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("vidchat", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" (voice: {})", self.recognizer)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.is_recording {
            spans.push(Span::styled(
                " | ● REC",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("scripted".into(), "Watching ABC123".into(), false);
        let text = render(&mut title_bar);
        assert!(text.contains("vidchat"));
        assert!(text.contains("voice: scripted"));
        assert!(text.contains("Watching ABC123"));
        assert!(!text.contains("REC"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("none".into(), String::new(), false);
        let text = render(&mut title_bar);
        assert!(text.contains("voice: none"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_recording_marker() {
        let mut title_bar = TitleBar::new("scripted".into(), "Watching ABC123".into(), true);
        assert!(render(&mut title_bar).contains("● REC"));
    }
}
