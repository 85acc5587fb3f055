//! # VideoPane Component
//!
//! Stands in for the embedded player. A terminal can't play video, so the
//! pane shows the embed descriptor the player would be opened with: the
//! identifying token, the submitted URL and the embed URL with its options.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::video::{EmbedOptions, VideoRef};
use crate::tui::component::Component;

/// Transient: built each frame from the App's video.
pub struct VideoPane<'a> {
    pub video: &'a VideoRef,
}

impl<'a> VideoPane<'a> {
    pub fn new(video: &'a VideoRef) -> Self {
        Self { video }
    }

    fn screen_lines(&self) -> Vec<Line<'a>> {
        if self.video.token.is_empty() {
            vec![
                Line::from(Span::styled(
                    "No video identifier found",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    "Restart with a link like youtube.com/watch?v=<id>",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        } else {
            vec![
                Line::from(Span::styled(
                    "▶",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    self.video.token.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ]
        }
    }

    fn detail_lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let options = EmbedOptions::default();
        let on_off = |on: bool| if on { "on" } else { "off" };
        vec![
            Line::from(vec![
                Span::styled("URL    ", label),
                Span::raw(self.video.url.trim().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Embed  ", label),
                Span::styled(self.video.embed_url(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(Span::styled(
                format!(
                    "autoplay {} · minimal branding {} · related videos {}",
                    on_off(options.autoplay),
                    on_off(options.modest_branding),
                    on_off(options.related_videos),
                ),
                label,
            )),
        ]
    }
}

impl<'a> Component for VideoPane<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Video");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [screen_area, details_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(5)]).areas(inner);

        let screen_block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
        let screen_inner = screen_block.inner(screen_area);
        frame.render_widget(screen_block, screen_area);

        let lines = self.screen_lines();
        let top_pad = screen_inner.height.saturating_sub(lines.len() as u16) / 2;
        let [_, centered] =
            Layout::vertical([Constraint::Length(top_pad), Constraint::Min(0)]).areas(screen_inner);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );

        frame.render_widget(
            Paragraph::new(self.detail_lines()).wrap(Wrap { trim: false }),
            details_area,
        );
    }
}
