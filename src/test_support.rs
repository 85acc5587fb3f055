//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;
use crate::core::voice::{Capability, VoiceSettings};

/// An App whose recognizer streams fragments live.
pub fn streaming_app() -> App {
    App::new(
        VoiceSettings::default(),
        Capability::Supported { streaming: true },
    )
}

/// An App whose recognizer only transcribes after recording stops.
pub fn batch_app() -> App {
    App::new(
        VoiceSettings::default(),
        Capability::Supported { streaming: false },
    )
}

/// An App with no speech capability at all.
pub fn unsupported_app() -> App {
    App::new(VoiceSettings::default(), Capability::Unsupported)
}

/// An App that already has a video loaded.
pub fn watching_app(url: &str) -> App {
    let mut app = streaming_app();
    app.submit_video(url);
    app
}
