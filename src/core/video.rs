//! # Video Reference
//!
//! Turns the URL the user pasted into an identifying token for the embedded
//! player, plus the fixed set of embed options the player is opened with.
//!
//! Token extraction never fails. A URL that can't be parsed, or that carries
//! neither a `v` query parameter nor a path, yields the empty string and the
//! player pane shows a hint instead of a video.

use reqwest::Url;

/// Base URL for the embedded player.
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// The video chosen for this session. Set once, never replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    /// The URL exactly as submitted (untrimmed).
    pub url: String,
    /// Identifying token derived from `url`. May be empty.
    pub token: String,
}

impl VideoRef {
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let token = extract_video_token(&url);
        Self { url, token }
    }

    pub fn embed_url(&self) -> String {
        embed_url(&self.token, &EmbedOptions::default())
    }
}

/// Display options handed to the embedding widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    pub autoplay: bool,
    pub modest_branding: bool,
    pub related_videos: bool,
}

impl Default for EmbedOptions {
    /// No autoplay, minimal branding, no related-content suggestions.
    fn default() -> Self {
        Self {
            autoplay: false,
            modest_branding: true,
            related_videos: false,
        }
    }
}

/// Derive the identifying token from a video URL.
///
/// 1. the `v` query parameter, if present and non-empty;
/// 2. otherwise the last path segment (possibly empty);
/// 3. `""` when the string isn't a URL at all.
///
/// The input is trimmed before parsing; the stored URL keeps its whitespace.
pub fn extract_video_token(raw: &str) -> String {
    let Ok(url) = Url::parse(raw.trim()) else {
        return String::new();
    };

    if let Some(v) = url
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())
    {
        return v;
    }

    url.path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("")
        .to_string()
}

/// Build the player URL for `token` with the given options.
pub fn embed_url(token: &str, options: &EmbedOptions) -> String {
    format!(
        "{}/{}?autoplay={}&modestbranding={}&rel={}",
        EMBED_BASE_URL,
        token,
        u8::from(options.autoplay),
        u8::from(options.modest_branding),
        u8::from(options.related_videos),
    )
}
