//! # CaptureBar Component
//!
//! The voice controls at the bottom of the chat panel: the record "button"
//! state, elapsed time against the maximum, a progress gauge, and the live
//! transcript while a recording is running.
//!
//! Stateless. Everything comes from `VoiceCapture` as props.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, LineGauge, Paragraph, Wrap};

use crate::core::voice::CaptureState;
use crate::tui::component::Component;

/// Rows the bar needs: border, status, gauge, two transcript lines, border.
pub const CAPTURE_BAR_HEIGHT: u16 = 6;

/// Pulse intensity above which the recording dot is drawn bold.
const PULSE_BOLD_THRESHOLD: f32 = 0.5;

pub struct CaptureBar<'a> {
    pub state: CaptureState,
    pub progress: u16,
    pub elapsed: Duration,
    pub max_duration: Duration,
    pub transcript: &'a str,
    /// 0.0..=1.0, drives the recording indicator
    pub pulse: f32,
}

fn clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl<'a> CaptureBar<'a> {
    fn status_line(&self) -> Line<'a> {
        let dim = Style::default().fg(Color::DarkGray);
        match self.state {
            CaptureState::Idle => Line::from(vec![
                Span::styled("● ", dim),
                Span::raw("Press "),
                Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to ask a question"),
            ]),
            CaptureState::Recording => {
                let mut dot = Style::default().fg(Color::Red);
                if self.pulse > PULSE_BOLD_THRESHOLD {
                    dot = dot.add_modifier(Modifier::BOLD);
                } else {
                    dot = dot.add_modifier(Modifier::DIM);
                }
                Line::from(vec![
                    Span::styled("● ", dot),
                    Span::styled("Recording ", Style::default().fg(Color::Red)),
                    Span::styled(
                        format!("{} / {}", clock(self.elapsed), clock(self.max_duration)),
                        dim,
                    ),
                    Span::styled("  Space to stop", dim),
                ])
            }
            CaptureState::Processing => Line::from(vec![
                Span::styled("◌ ", Style::default().fg(Color::Yellow)),
                Span::styled("Transcribing your question...", Style::default().fg(Color::Yellow)),
            ]),
            CaptureState::Disabled => Line::from(vec![
                Span::styled("○ ", dim),
                Span::styled("Voice input unavailable", dim),
            ]),
        }
    }

    fn transcript_line(&self) -> Line<'a> {
        let style = Style::default().add_modifier(Modifier::ITALIC);
        match self.state {
            CaptureState::Recording if self.transcript.is_empty() => {
                Line::from(Span::styled("Listening...", style.fg(Color::DarkGray)))
            }
            CaptureState::Recording | CaptureState::Processing => {
                Line::from(Span::styled(self.transcript, style))
            }
            _ => Line::default(),
        }
    }
}

impl<'a> Component for CaptureBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Voice");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status_area, gauge_area, transcript_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.status_line()), status_area);

        if matches!(
            self.state,
            CaptureState::Recording | CaptureState::Processing
        ) {
            let ratio = f64::from(self.progress.min(100)) / 100.0;
            let gauge = LineGauge::default()
                .filled_style(Style::default().fg(Color::Red))
                .unfilled_style(Style::default().fg(Color::DarkGray))
                .label(format!("{:>3}%", self.progress))
                .ratio(ratio);
            frame.render_widget(gauge, gauge_area);
        }

        frame.render_widget(
            Paragraph::new(self.transcript_line()).wrap(Wrap { trim: true }),
            transcript_area,
        );
    }
}
