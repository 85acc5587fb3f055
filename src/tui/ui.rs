use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::core::voice::CaptureState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ChatPanel, TitleBar, Toast, VideoPane};

/// Below this width the video pane stacks on top of the chat.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Height of the video pane when stacked.
const STACKED_VIDEO_HEIGHT: u16 = 12;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let is_recording = app.voice.state() == CaptureState::Recording;
    TitleBar::new(
        tui.recognizer_name.clone(),
        app.status_message.clone(),
        is_recording,
    )
    .render(frame, title_area);

    match &app.video {
        None => tui.form.render(frame, main_area),
        Some(video) => {
            let [video_area, chat_area] = split_panes(main_area);
            VideoPane::new(video).render(frame, video_area);
            ChatPanel {
                list_state: &mut tui.message_list,
                messages: &app.messages,
                voice: &app.voice,
                now,
                pulse: tui.pulse_value,
            }
            .render(frame, chat_area);
        }
    }

    if let Some(notice) = app.notices.front() {
        Toast {
            notice,
            queued: app.notices.len() - 1,
        }
        .render(frame, main_area);
    }
}

/// Video on the left and chat on the right, or stacked on narrow terminals.
pub fn split_panes(area: Rect) -> [Rect; 2] {
    if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area)
    } else {
        Layout::vertical([
            Constraint::Length(STACKED_VIDEO_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notice::Notice;
    use crate::test_support::{streaming_app, watching_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new("scripted");
        terminal
            .draw(|f| draw_ui(f, app, &mut tui, Instant::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_form_shown_before_submission() {
        let app = streaming_app();
        let text = draw(&app, 100, 30);
        assert!(text.contains("Video URL"));
        assert!(!text.contains("Chat ("));
    }

    #[test]
    fn test_two_panes_after_submission() {
        let app = watching_app("https://www.youtube.com/watch?v=ABC123");
        let text = draw(&app, 120, 30);
        assert!(!text.contains("Video URL"));
        assert!(text.contains("ABC123"));
        assert!(text.contains("Chat (0)"));
    }

    #[test]
    fn test_toast_overlays_oldest_notice() {
        let mut app = watching_app("https://youtu.be/XYZ789");
        app.notify(Notice::info("No speech detected", ""));
        app.notify(Notice::info("Second", ""));
        let text = draw(&app, 120, 30);
        assert!(text.contains("No speech detected"));
        assert!(text.contains("1 more"));
        assert!(!text.contains("Second"));
    }

    #[test]
    fn test_split_panes_stacks_when_narrow() {
        let [video, chat] = split_panes(Rect::new(0, 0, 80, 40));
        assert_eq!(video.width, 80);
        assert_eq!(video.height, STACKED_VIDEO_HEIGHT);
        assert_eq!(chat.y, STACKED_VIDEO_HEIGHT);

        let [video, chat] = split_panes(Rect::new(0, 0, 120, 40));
        assert_eq!(video.height, 40);
        assert!(chat.x > 0);
    }
}
