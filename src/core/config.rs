//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.vidchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::voice::{
    DEFAULT_MAX_DURATION, DEFAULT_PROCESSING_TIMEOUT, DEFAULT_SILENCE_TIMEOUT, VoiceSettings,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VidchatConfig {
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub scripted: ScriptedConfig,
    #[serde(default)]
    pub transcriber: TranscriberConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpeechConfig {
    pub recognizer: Option<String>,
    pub silence_timeout_secs: Option<u64>,
    pub max_duration_secs: Option<u64>,
    pub processing_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScriptedConfig {
    pub utterance: Option<String>,
    pub word_interval_ms: Option<u64>,
    pub start_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TranscriberConfig {
    pub kind: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub mock_delay_ms: Option<u64>,
    pub mock_transcript: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_RECOGNIZER: &str = "scripted";
pub const DEFAULT_TRANSCRIBER_KIND: &str = "mock";
pub const DEFAULT_UTTERANCE: &str = "What is happening in this part of the video?";
pub const DEFAULT_WORD_INTERVAL_MS: u64 = 350;
pub const DEFAULT_START_DELAY_MS: u64 = 800;
pub const DEFAULT_MOCK_DELAY_MS: u64 = 1500;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// "scripted", "transcribe" or "none".
    pub recognizer: String,
    pub voice: VoiceSettings,
    pub utterance: String,
    pub word_interval: Duration,
    pub start_delay: Duration,
    /// "mock" or "http".
    pub transcriber_kind: String,
    pub transcriber_base_url: Option<String>,
    pub transcriber_api_key: Option<String>,
    pub transcriber_model: Option<String>,
    pub mock_delay: Duration,
    pub mock_transcript: Option<String>,
    /// Video submitted at startup, skipping the form.
    pub initial_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.vidchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vidchat").join("config.toml"))
}

/// Load config from `~/.vidchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `VidchatConfig::default()`. Malformed files are a `ConfigError::Parse`.
pub fn load_config() -> Result<VidchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VidchatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(VidchatConfig::default());
    }

    parse_config_file(&path)
}

fn parse_config_file(path: &PathBuf) -> Result<VidchatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: VidchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# vidchat configuration
# Every setting is optional. Anything left out uses its default.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [speech]
# recognizer = "scripted"            # "scripted", "transcribe" or "none" (or VIDCHAT_RECOGNIZER)
# silence_timeout_secs = 5           # stop after this long without speech
# max_duration_secs = 30             # hard cap per recording
# processing_timeout_secs = 10       # how long "transcribe" may take after stop

# [scripted]
# utterance = "What is happening in this part of the video?"
# word_interval_ms = 350
# start_delay_ms = 800

# [transcriber]
# kind = "mock"                      # "mock" or "http"
# base_url = "http://localhost:8000/v1"   # Or set VIDCHAT_TRANSCRIBER_URL
# api_key = "sk-..."                 # Or set VIDCHAT_TRANSCRIBER_API_KEY
# model = "whisper-1"
# mock_delay_ms = 1500
# mock_transcript = "This is a simulated transcript of your question about the video."
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_recognizer` and `cli_url` come from CLI flags (None = not specified).
pub fn resolve(
    config: &VidchatConfig,
    cli_recognizer: Option<&str>,
    cli_url: Option<&str>,
) -> ResolvedConfig {
    // Recognizer: CLI → env → config → default
    let recognizer = cli_recognizer
        .map(|s| s.to_string())
        .or_else(|| std::env::var("VIDCHAT_RECOGNIZER").ok())
        .or_else(|| config.speech.recognizer.clone())
        .unwrap_or_else(|| DEFAULT_RECOGNIZER.to_string());

    let voice = VoiceSettings {
        silence_timeout: secs_or(config.speech.silence_timeout_secs, DEFAULT_SILENCE_TIMEOUT),
        max_duration: secs_or(config.speech.max_duration_secs, DEFAULT_MAX_DURATION),
        processing_timeout: secs_or(
            config.speech.processing_timeout_secs,
            DEFAULT_PROCESSING_TIMEOUT,
        ),
    };

    // Transcriber URL and key: env → config
    let transcriber_base_url = std::env::var("VIDCHAT_TRANSCRIBER_URL")
        .ok()
        .or_else(|| config.transcriber.base_url.clone());
    let transcriber_api_key = std::env::var("VIDCHAT_TRANSCRIBER_API_KEY")
        .ok()
        .or_else(|| config.transcriber.api_key.clone());

    ResolvedConfig {
        recognizer,
        voice,
        utterance: config
            .scripted
            .utterance
            .clone()
            .unwrap_or_else(|| DEFAULT_UTTERANCE.to_string()),
        word_interval: Duration::from_millis(
            config
                .scripted
                .word_interval_ms
                .unwrap_or(DEFAULT_WORD_INTERVAL_MS),
        ),
        start_delay: Duration::from_millis(
            config
                .scripted
                .start_delay_ms
                .unwrap_or(DEFAULT_START_DELAY_MS),
        ),
        transcriber_kind: config
            .transcriber
            .kind
            .clone()
            .unwrap_or_else(|| DEFAULT_TRANSCRIBER_KIND.to_string()),
        transcriber_base_url,
        transcriber_api_key,
        transcriber_model: config.transcriber.model.clone(),
        mock_delay: Duration::from_millis(
            config
                .transcriber
                .mock_delay_ms
                .unwrap_or(DEFAULT_MOCK_DELAY_MS),
        ),
        mock_transcript: config.transcriber.mock_transcript.clone(),
        initial_url: cli_url.map(|s| s.to_string()),
    }
}

fn secs_or(value: Option<u64>, default: Duration) -> Duration {
    value.map(Duration::from_secs).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = VidchatConfig::default();
        assert!(config.speech.recognizer.is_none());
        assert!(config.transcriber.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = VidchatConfig::default();
        let resolved = resolve(&config, Some("scripted"), None);
        assert_eq!(resolved.voice, VoiceSettings::default());
        assert_eq!(resolved.utterance, DEFAULT_UTTERANCE);
        assert_eq!(
            resolved.word_interval,
            Duration::from_millis(DEFAULT_WORD_INTERVAL_MS)
        );
        assert_eq!(resolved.transcriber_kind, "mock");
        assert!(resolved.initial_url.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = VidchatConfig {
            speech: SpeechConfig {
                recognizer: Some("transcribe".to_string()),
                silence_timeout_secs: Some(3),
                max_duration_secs: Some(60),
                processing_timeout_secs: Some(20),
            },
            scripted: ScriptedConfig {
                utterance: Some("hello there".to_string()),
                word_interval_ms: Some(100),
                start_delay_ms: Some(0),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.voice.silence_timeout, Duration::from_secs(3));
        assert_eq!(resolved.voice.max_duration, Duration::from_secs(60));
        assert_eq!(resolved.voice.processing_timeout, Duration::from_secs(20));
        assert_eq!(resolved.utterance, "hello there");
        assert_eq!(resolved.start_delay, Duration::ZERO);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = VidchatConfig {
            speech: SpeechConfig {
                recognizer: Some("transcribe".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("none"), Some("https://youtu.be/XYZ789"));
        assert_eq!(resolved.recognizer, "none");
        assert_eq!(resolved.initial_url.as_deref(), Some("https://youtu.be/XYZ789"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[speech]
recognizer = "transcribe"
silence_timeout_secs = 4

[transcriber]
kind = "http"
base_url = "http://localhost:8000/v1"
api_key = "sk-test-123"
model = "whisper-1"
"#;
        let config: VidchatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.speech.recognizer.as_deref(), Some("transcribe"));
        assert_eq!(config.speech.silence_timeout_secs, Some(4));
        assert_eq!(config.transcriber.kind.as_deref(), Some("http"));
        assert_eq!(config.transcriber.api_key.as_deref(), Some("sk-test-123"));
        assert!(config.scripted.utterance.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[scripted]
word_interval_ms = 200
"#;
        let config: VidchatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scripted.word_interval_ms, Some(200));
        assert!(config.speech.recognizer.is_none());
        assert!(config.transcriber.kind.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("vidchat-bad-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[speech\nrecognizer = ").unwrap();
        let result = parse_config_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
