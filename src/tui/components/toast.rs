//! # Toast Component
//!
//! Overlay for the oldest pending `Notice`, anchored to the top-right
//! corner. Destructive notices are red, informational ones cyan.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notice::{Notice, Severity};
use crate::tui::component::Component;

const TOAST_MAX_WIDTH: u16 = 48;

pub struct Toast<'a> {
    pub notice: &'a Notice,
    /// Notices waiting behind this one
    pub queued: usize,
}

impl<'a> Toast<'a> {
    fn accent(&self) -> Style {
        match self.notice.severity {
            Severity::Info => Style::default().fg(Color::Cyan),
            Severity::Destructive => Style::default().fg(Color::Red),
        }
    }

    /// Where the toast goes inside `area`.
    pub fn area(&self, area: Rect) -> Rect {
        let width = TOAST_MAX_WIDTH.min(area.width);
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let body_lines = if self.notice.description.is_empty() {
            0
        } else {
            textwrap::wrap(&self.notice.description, inner_width).len() as u16
        };
        // title + body + footer + borders
        let height = (1 + body_lines + 1 + 2).min(area.height);
        Rect::new(area.x + area.width - width, area.y, width, height)
    }
}

impl<'a> Component for Toast<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let toast_area = self.area(area);
        let accent = self.accent();

        let footer = if self.queued > 0 {
            format!("Esc to dismiss · {} more", self.queued)
        } else {
            "Esc to dismiss".to_string()
        };
        let mut lines = vec![Line::from(Span::styled(
            self.notice.title.as_str(),
            accent.add_modifier(Modifier::BOLD),
        ))];
        if !self.notice.description.is_empty() {
            lines.push(Line::from(self.notice.description.as_str()));
        }
        lines.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent);

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            toast_area,
        );
    }
}
