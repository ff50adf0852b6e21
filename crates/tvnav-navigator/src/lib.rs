//! # tvnav Navigator
//!
//! Spatial focus navigation for TV remotes over any [`HostPage`].
//!
//! - [`SpatialNavigator`] discovers focusable elements, keeps the cursor and
//!   moves the focus marker in response to arrow keys.
//! - [`PlaybackShortcuts`] maps transport keys onto `<video>` elements.
//! - [`NavigatorController`] owns the page and processes [`HostEvent`]s on a
//!   single task, coalescing mutation bursts into one rebuild.
//!
//! [`HostPage`]: tvnav_dom::HostPage

mod controller;
mod cursor;
mod debug;
mod direction;
mod error;
mod focus_set;
mod keys;
mod navigator;
mod playback;
mod remote_keys;
mod styles;

pub use controller::{ControllerHandle, ControllerSettings, HostEvent, NavigatorController};
pub use cursor::CursorHider;
pub use debug::{DebugElement, DebugSnapshot};
pub use direction::Direction;
pub use error::NavigatorError;
pub use focus_set::{FocusEntry, FocusSnapshot, is_visible, sort_reading_order};
pub use keys::{KeyEvent, KeyOutcome, MediaKey, RemoteKey};
pub use navigator::{NavigatorSettings, SpatialNavigator, directional_distance};
pub use playback::PlaybackShortcuts;
pub use remote_keys::{InputDeviceApi, register_remote_keys};
pub use styles::tv_stylesheet;
