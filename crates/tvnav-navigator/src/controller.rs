//! Event loop that owns the page and drives navigation from host events.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, trace};
use tvnav_config::Config;
use tvnav_dom::{ElementId, HostPage, MediaEvent};

use crate::cursor::CursorHider;
use crate::debug::DebugSnapshot;
use crate::error::NavigatorError;
use crate::keys::{KeyEvent, KeyOutcome, RemoteKey};
use crate::navigator::SpatialNavigator;
use crate::playback::PlaybackShortcuts;
use crate::remote_keys::{InputDeviceApi, register_remote_keys};
use crate::styles::tv_stylesheet;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something the host observed on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Key(KeyEvent),
    /// A batch of DOM mutations.
    Mutation,
    PointerMove,
    /// The pointer entered an element.
    PointerEnter(ElementId),
    /// Play/pause of a listened media element.
    Media(MediaEvent),
    /// Rebuild the focusable set now.
    Rescan,
    SetFocus(usize),
}

/// Controller options taken from the loaded configuration.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub rescan_debounce: Duration,
    pub inject_styles: bool,
    pub register_keys: bool,
    pub remote_keys: Vec<String>,
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rescan_debounce: Duration::from_millis(config.navigator.rescan_debounce_ms),
            inject_styles: config.ui.inject_styles,
            register_keys: config.remote.register_keys,
            remote_keys: config.remote.keys.clone(),
        }
    }
}

/// Single owner of the page and all navigation state.
pub struct NavigatorController<P> {
    page: P,
    navigator: SpatialNavigator,
    playback: PlaybackShortcuts,
    cursor: CursorHider,
    settings: ControllerSettings,
    input_device: Option<Box<dyn InputDeviceApi>>,
    pending_rescan: Option<Instant>,
    started: bool,
    snapshot_tx: watch::Sender<DebugSnapshot>,
}

impl<P: HostPage> NavigatorController<P> {
    pub fn new(page: P, config: &Config) -> Result<Self, NavigatorError> {
        let (snapshot_tx, _) = watch::channel(DebugSnapshot::default());
        Ok(Self {
            page,
            navigator: SpatialNavigator::from_config(&config.navigator)?,
            playback: PlaybackShortcuts::new(&config.playback),
            cursor: CursorHider::new(
                config.ui.hide_cursor,
                Duration::from_millis(config.ui.cursor_hide_ms),
            ),
            settings: ControllerSettings::from_config(config),
            input_device: None,
            pending_rescan: None,
            started: false,
            snapshot_tx,
        })
    }

    pub fn with_input_device(mut self, device: Box<dyn InputDeviceApi>) -> Self {
        self.input_device = Some(device);
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn navigator(&self) -> &SpatialNavigator {
        &self.navigator
    }

    pub fn playback(&self) -> &PlaybackShortcuts {
        &self.playback
    }

    pub fn subscribe(&self) -> watch::Receiver<DebugSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot::capture(&self.navigator, &self.playback)
    }

    pub fn rescan_pending(&self) -> bool {
        self.pending_rescan.is_some()
    }

    /// One-time page setup. Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if self.settings.register_keys {
            match self.input_device.as_mut() {
                Some(device) => {
                    register_remote_keys(device.as_mut(), &self.settings.remote_keys);
                }
                None => debug!("No input device API, remote keys not registered"),
            }
        }
        if self.settings.inject_styles {
            let css = tv_stylesheet(&self.navigator.settings().marker_class);
            self.page.inject_stylesheet(&css);
        }
        self.cursor.start(&mut self.page);

        // The rebuild focuses the first element when there is one.
        self.navigator.rebuild_focusable_set(&mut self.page);
        self.playback.enhance_videos(&mut self.page);

        self.drain_media_events();
        self.publish();
        info!(
            "Navigator started with {} focusable elements",
            self.navigator.snapshot().len()
        );
    }

    /// Apply one host event.
    pub fn handle_event(&mut self, event: HostEvent, now: Instant) -> KeyOutcome {
        trace!("Host event: {:?}", event);
        let outcome = match event {
            HostEvent::Key(key) => self.handle_key(&key),
            HostEvent::Mutation => {
                self.schedule_rescan(now);
                KeyOutcome::ignored()
            }
            HostEvent::PointerMove => {
                self.cursor.on_pointer_move(&mut self.page, now);
                KeyOutcome::ignored()
            }
            HostEvent::PointerEnter(id) => {
                self.flush_pending_rescan();
                self.navigator.focus_element(&mut self.page, id);
                KeyOutcome::ignored()
            }
            HostEvent::Media(event) => {
                self.playback.on_media_event(event);
                KeyOutcome::ignored()
            }
            HostEvent::Rescan => {
                self.flush_rescan();
                KeyOutcome::ignored()
            }
            HostEvent::SetFocus(index) => {
                self.flush_pending_rescan();
                self.navigator.set_focus(&mut self.page, index);
                KeyOutcome::ignored()
            }
        };
        self.drain_media_events();
        self.publish();
        outcome
    }

    /// Dispatch a key: the focused video first, then the global bindings.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        self.flush_pending_rescan();

        if let Some(target) = key.target {
            if PlaybackShortcuts::is_enhanced(&self.page, target)
                && self.playback.handle_video_key(&mut self.page, target, key)
            {
                debug!("Video {} consumed {}", target, key);
                return KeyOutcome::handled(true);
            }
        }

        let Some(remote) = RemoteKey::from_key(&key.key) else {
            return KeyOutcome::ignored();
        };
        let prevent_default = remote.prevents_default();
        match remote {
            RemoteKey::Arrow(direction) => {
                self.navigator.navigate(&mut self.page, direction);
            }
            RemoteKey::Enter => {
                self.navigator.activate(&mut self.page);
            }
            RemoteKey::Back => self.navigator.go_back(&mut self.page),
            RemoteKey::Media(media) => {
                if !self.playback.handle_media_key(&mut self.page, media, key.target) {
                    return KeyOutcome::ignored();
                }
            }
        }
        KeyOutcome::handled(prevent_default)
    }

    /// Earliest pending deadline: the rescan window or the cursor timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending_rescan, self.cursor.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run whatever is due at `now`.
    pub fn on_deadline(&mut self, now: Instant) {
        if self.pending_rescan.is_some_and(|due| due <= now) {
            self.flush_rescan();
        }
        self.cursor.on_deadline(&mut self.page, now);
        self.drain_media_events();
        self.publish();
    }

    /// Process events until the channel closes, then hand the page back.
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> P {
        self.start();
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle_event(event, Instant::now());
                    }
                    None => break,
                },
                _ = sleep_until(deadline) => self.on_deadline(Instant::now()),
            }
        }
        info!("Navigator event channel closed");
        self.page
    }

    fn schedule_rescan(&mut self, now: Instant) {
        if self.settings.rescan_debounce.is_zero() {
            self.flush_rescan();
        } else if self.pending_rescan.is_none() {
            self.pending_rescan = Some(now + self.settings.rescan_debounce);
        }
    }

    /// Anything that resolves against the snapshot must see pending mutations first.
    fn flush_pending_rescan(&mut self) {
        if self.pending_rescan.is_some() {
            self.flush_rescan();
        }
    }

    fn flush_rescan(&mut self) {
        self.pending_rescan = None;
        self.navigator.rebuild_focusable_set(&mut self.page);
        self.playback.enhance_videos(&mut self.page);
    }

    fn drain_media_events(&mut self) {
        for event in self.page.take_media_events() {
            self.playback.on_media_event(event);
        }
    }

    fn publish(&self) {
        let snapshot = self.debug_snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }
}

impl<P: HostPage + Send + 'static> NavigatorController<P> {
    /// Run the controller on its own task.
    pub fn spawn(self) -> (ControllerHandle, JoinHandle<P>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = ControllerHandle {
            events: events_tx,
            snapshots: self.subscribe(),
        };
        let task = tokio::spawn(self.run(events_rx));
        (handle, task)
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Sending side of a spawned controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    events: mpsc::Sender<HostEvent>,
    snapshots: watch::Receiver<DebugSnapshot>,
}

impl ControllerHandle {
    pub async fn send(&self, event: HostEvent) -> Result<(), NavigatorError> {
        self.events
            .send(event)
            .await
            .map_err(|_| NavigatorError::ControllerClosed)
    }

    pub fn subscribe(&self) -> watch::Receiver<DebugSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> DebugSnapshot {
        self.snapshots.borrow().clone()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
