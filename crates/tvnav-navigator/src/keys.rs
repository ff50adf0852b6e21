//! Remote key events and their meaning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tvnav_dom::ElementId;

use crate::direction::Direction;

/// A key press delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// DOM `key` value, e.g. `ArrowDown`, `Enter`, `MediaPlay`, `" "`.
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    /// Element the key was dispatched to, when it is not the document.
    #[serde(default)]
    pub target: Option<ElementId>,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            target: None,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        match self.key.as_str() {
            " " => f.write_str("Space")?,
            key => f.write_str(key)?,
        }
        if let Some(target) = self.target {
            write!(f, "@{}", target.0)?;
        }
        Ok(())
    }
}

/// Parses `[Ctrl+]Key[@target]`, with `Space` standing for `" "`.
impl FromStr for KeyEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (s, ctrl) = match s.strip_prefix("Ctrl+") {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let (key, target) = match s.rsplit_once('@') {
            Some((key, target)) => {
                let id = target
                    .parse::<u64>()
                    .map_err(|_| format!("invalid key target '{}'", target))?;
                (key, Some(ElementId(id)))
            }
            None => (s, None),
        };
        if key.is_empty() {
            return Err("empty key".to_string());
        }
        let key = if key == "Space" { " " } else { key };
        Ok(Self {
            key: key.to_string(),
            ctrl,
            target,
        })
    }
}

/// Transport and volume keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKey {
    Play,
    Pause,
    PlayPause,
    Stop,
    Rewind,
    FastForward,
    VolumeUp,
    VolumeDown,
    VolumeMute,
}

/// What a key means to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Arrow(Direction),
    Enter,
    Back,
    Media(MediaKey),
}

impl RemoteKey {
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_arrow_key(key) {
            return Some(RemoteKey::Arrow(direction));
        }
        let media = match key {
            "Enter" => return Some(RemoteKey::Enter),
            "Escape" | "Return" => return Some(RemoteKey::Back),
            "MediaPlay" => MediaKey::Play,
            "MediaPause" => MediaKey::Pause,
            "MediaPlayPause" => MediaKey::PlayPause,
            "MediaStop" => MediaKey::Stop,
            "MediaRewind" => MediaKey::Rewind,
            "MediaFastForward" => MediaKey::FastForward,
            "VolumeUp" | "AudioVolumeUp" => MediaKey::VolumeUp,
            "VolumeDown" | "AudioVolumeDown" => MediaKey::VolumeDown,
            "VolumeMute" | "AudioVolumeMute" => MediaKey::VolumeMute,
            _ => return None,
        };
        Some(RemoteKey::Media(media))
    }

    /// Arrows and Enter suppress the browser's default action.
    pub fn prevents_default(self) -> bool {
        matches!(self, RemoteKey::Arrow(_) | RemoteKey::Enter)
    }
}

/// Result of dispatching one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KeyOutcome {
    /// The key was acted on.
    pub handled: bool,
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled(prevent_default: bool) -> Self {
        Self {
            handled: true,
            prevent_default,
        }
    }
}
