//! # Core Application Logic
//!
//! vidchat's business logic. It knows nothing about any specific UI technology.
//! Apart from reading the config file it does no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • VoiceCapture (FSM)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   Speech   │
//!           │  Adapter   │              │   driver   │
//!           │ (ratatui)  │              │  (tokio)   │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`voice`]: The recording lifecycle state machine
//! - [`video`]: Video token extraction and embed descriptors
//! - [`message`]: Chat messages and the append-only log
//! - [`notice`]: Toast notices
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod message;
pub mod notice;
pub mod state;
pub mod video;
pub mod voice;
