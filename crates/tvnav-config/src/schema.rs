//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub navigator: NavigatorConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Status server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8085
}

/// Identity reported by the status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name reported by `/health`.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Short name reported by `/api/status`.
    #[serde(default = "default_short_name")]
    pub short_name: String,

    /// Version reported by `/health`. Falls back to the crate version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            short_name: default_short_name(),
            version: None,
        }
    }
}

fn default_service_name() -> String {
    "tvnav TV Service".to_string()
}

fn default_short_name() -> String {
    "tvnav".to_string()
}

/// Spatial navigator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Selectors whose matches are candidates for remote focus.
    #[serde(default = "default_focusable_selectors")]
    pub focusable_selectors: Vec<String>,

    /// Selectors identifying media cards (hover focuses them).
    #[serde(default = "default_media_card_selectors")]
    pub media_card_selectors: Vec<String>,

    /// Selectors identifying an on-page back control.
    #[serde(default = "default_back_selectors")]
    pub back_selectors: Vec<String>,

    /// Class applied to the focused element.
    #[serde(default = "default_marker_class")]
    pub marker_class: String,

    /// Tops closer than this are ordered left-to-right.
    #[serde(default = "default_row_tolerance")]
    pub row_tolerance_px: f64,

    /// Maximum top offset for a horizontal move candidate.
    #[serde(default = "default_same_row")]
    pub same_row_px: f64,

    /// Coalescing window for mutation-driven rescans.
    #[serde(default = "default_rescan_debounce")]
    pub rescan_debounce_ms: u64,

    /// Inline outline applied to the focused element.
    #[serde(default = "default_outline")]
    pub outline: String,

    #[serde(default = "default_outline_offset")]
    pub outline_offset: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            focusable_selectors: default_focusable_selectors(),
            media_card_selectors: default_media_card_selectors(),
            back_selectors: default_back_selectors(),
            marker_class: default_marker_class(),
            row_tolerance_px: default_row_tolerance(),
            same_row_px: default_same_row(),
            rescan_debounce_ms: default_rescan_debounce(),
            outline: default_outline(),
            outline_offset: default_outline_offset(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_focusable_selectors() -> Vec<String> {
    strings(&[
        "nav a",
        ".nav a",
        ".nav-item",
        "a[href]",
        "button",
        "[data-play=\"true\"]",
        ".movie-card",
        ".tv-card",
        "[href*=\"/movie/\"]",
        "[href*=\"/tv/\"]",
        "input[type=\"text\"]",
        "input[type=\"search\"]",
        "[tabindex]:not([tabindex=\"-1\"])",
        ".play-button",
        ".video-controls button",
    ])
}

fn default_media_card_selectors() -> Vec<String> {
    strings(&[
        ".movie-card",
        ".tv-card",
        "[href*=\"/movie/\"]",
        "[href*=\"/tv/\"]",
    ])
}

fn default_back_selectors() -> Vec<String> {
    strings(&[
        ".back-button",
        "[aria-label*=\"back\"]",
        "[title*=\"back\"]",
    ])
}

fn default_marker_class() -> String {
    "tv-focused".to_string()
}

fn default_row_tolerance() -> f64 {
    10.0
}

fn default_same_row() -> f64 {
    100.0
}

fn default_rescan_debounce() -> u64 {
    50
}

fn default_outline() -> String {
    "3px solid #ff6b6b".to_string()
}

fn default_outline_offset() -> String {
    "2px".to_string()
}

/// Playback shortcut configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Rewind/fast-forward step in seconds.
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    /// Volume adjustment step in `[0, 1]`.
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
        }
    }
}

fn default_seek_step() -> f64 {
    10.0
}

fn default_volume_step() -> f64 {
    0.1
}

/// Presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub inject_styles: bool,

    /// Hide the pointer when idle.
    #[serde(default = "default_true")]
    pub hide_cursor: bool,

    #[serde(default = "default_cursor_hide_ms")]
    pub cursor_hide_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            inject_styles: true,
            hide_cursor: true,
            cursor_hide_ms: default_cursor_hide_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cursor_hide_ms() -> u64 {
    3000
}

/// Extended remote key registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_true")]
    pub register_keys: bool,

    #[serde(default = "default_remote_keys")]
    pub keys: Vec<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            register_keys: true,
            keys: default_remote_keys(),
        }
    }
}

fn default_remote_keys() -> Vec<String> {
    strings(&[
        "MediaPlay",
        "MediaPause",
        "MediaStop",
        "MediaRewind",
        "MediaFastForward",
        "VolumeUp",
        "VolumeDown",
        "VolumeMute",
    ])
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
