//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from App data:
//! - `TitleBar`: top status bar
//! - `VideoPane`: the embed descriptor standing in for the player
//! - `ChatMessage`: one chat message
//! - `CaptureBar`: voice controls, progress and live transcript
//! - `ChatPanel`: `MessageList` + `CaptureBar`
//! - `Toast`: the oldest pending notice
//!
//! ### Stateful Components (Event-Driven)
//!
//! Hold local state and emit events:
//! - `VideoForm`: URL field, emits `FormEvent::Submit`
//! - `MessageListState`: scroll position and layout cache for `MessageList`
//!
//! Components receive external data as props (struct fields), never by
//! reaching into the App, so each one can be rendered on a `TestBackend`
//! in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── video_form/      (URL field + editing helpers)
//! ├── video_pane.rs
//! ├── chat_panel.rs
//! ├── message_list.rs
//! ├── message.rs
//! ├── capture_bar.rs
//! └── toast.rs
//! ```

pub mod capture_bar;
pub mod chat_panel;
pub mod message;
pub mod message_list;
mod title_bar;
pub mod toast;
pub mod video_form;
pub mod video_pane;

pub use capture_bar::CaptureBar;
pub use chat_panel::ChatPanel;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use toast::Toast;
pub use video_form::{FormEvent, VideoForm};
pub use video_pane::VideoPane;
