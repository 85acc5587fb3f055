//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Screens
//!
//! - **Form**: shown until a video URL is submitted.
//! - **Watching**: video pane and chat panel side by side. Space (or `r`)
//!   starts and stops a voice recording, arrows and the mouse wheel scroll
//!   the chat, Esc dismisses the current notice, `q` quits.
//!
//! Ctrl+C quits from anywhere. Quitting tears the capture down first so no
//! recognizer or watchdog outlives the panel.
//!
//! ## Redraw Strategy
//!
//! - **Recording / transcribing**: draws every ~100ms so the elapsed time,
//!   gauge and recording dot stay live.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions or when a toast expires.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::voice::{CaptureEvent, CaptureState};
use crate::speech::CaptureDriver;
use crate::speech::driver::now as capture_now;
use crate::speech::providers::build_recognizer;
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, MessageListState, VideoForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long a toast stays up before it dismisses itself.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

const ACTIVE_POLL: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: VideoForm,
    pub message_list: MessageListState,
    pub recognizer_name: String,
    /// 0.0..=1.0, drives the recording indicator
    pub pulse_value: f32,
    /// When the front notice was first shown
    pub toast_shown_at: Option<Instant>,
}

impl TuiState {
    pub fn new(recognizer_name: &str) -> Self {
        Self {
            form: VideoForm::new(),
            message_list: MessageListState::new(),
            recognizer_name: recognizer_name.to_string(),
            pulse_value: 0.0,
            toast_shown_at: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run `update` and hand any capture work to the driver.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, driver: &mut CaptureDriver, action: Action) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::Capture(effects) => {
            driver.apply(effects);
            false
        }
        Effect::None => false,
    }
}

/// Keys on the watching screen.
fn handle_watching_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    driver: &mut CaptureDriver,
) -> bool {
    match event {
        TuiEvent::InputChar(' ') | TuiEvent::InputChar('r') | TuiEvent::Submit => dispatch(
            app,
            driver,
            Action::Capture(CaptureEvent::Toggle, capture_now()),
        ),
        TuiEvent::InputChar('q') => dispatch(app, driver, Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            false
        }
        _ => false,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut driver = CaptureDriver::new(build_recognizer(&config), tx);
    let mut app = App::from_config(&config, driver.capability());
    let mut tui = TuiState::new(driver.recognizer_name());
    info!(
        "Recognizer '{}' capability: {:?}",
        driver.recognizer_name(),
        driver.capability()
    );

    if let Some(url) = config.initial_url.clone() {
        dispatch(&mut app, &mut driver, Action::SubmitVideo(url));
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        let now = capture_now();
        let active = matches!(
            app.voice.state(),
            CaptureState::Recording | CaptureState::Processing
        );

        // Toast expiry
        if app.notices.is_empty() {
            tui.toast_shown_at = None;
        } else {
            let shown_at = *tui.toast_shown_at.get_or_insert(now);
            if now.saturating_duration_since(shown_at) >= TOAST_DURATION {
                dispatch(&mut app, &mut driver, Action::DismissNotice);
                tui.toast_shown_at = None;
                needs_redraw = true;
            }
        }

        if active {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 4.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            needs_redraw = false;
        }

        let timeout = if active || !app.notices.is_empty() {
            ACTIVE_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= dispatch(&mut app, &mut driver, Action::Quit);
                continue;
            }

            // Esc dismisses the visible toast on either screen
            if matches!(event, TuiEvent::Escape) {
                if !app.notices.is_empty() {
                    dispatch(&mut app, &mut driver, Action::DismissNotice);
                    tui.toast_shown_at = None;
                }
                continue;
            }

            if app.shows_form() {
                if let Some(FormEvent::Submit(url)) = tui.form.handle_event(&event) {
                    dispatch(&mut app, &mut driver, Action::SubmitVideo(url));
                }
            } else {
                should_quit |= handle_watching_event(&event, &mut app, &mut tui, &mut driver);
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fragments, watchdogs, recognizer exits)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, &mut driver, action) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    // Tear the panel down: no message, no lingering tasks
    dispatch(
        &mut app,
        &mut driver,
        Action::Capture(CaptureEvent::Teardown, capture_now()),
    );
    driver.teardown();
    info!("vidchat shutting down ({} messages)", app.messages.len());

    ratatui::restore();
    Ok(())
}
