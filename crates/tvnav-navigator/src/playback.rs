//! Media key shortcuts for `<video>` elements.

use tracing::{debug, trace};
use tvnav_config::PlaybackConfig;
use tvnav_dom::{ElementId, HostPage, MediaEvent, MediaEventKind};

use crate::keys::{KeyEvent, MediaKey};

const ENHANCED_ATTR: &str = "data-enhanced";

/// Transport controls and the designated active player.
#[derive(Debug, Clone)]
pub struct PlaybackShortcuts {
    seek_step: f64,
    volume_step: f64,
    active: Option<ElementId>,
    video_playing: bool,
}

impl PlaybackShortcuts {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            seek_step: config.seek_step_secs,
            volume_step: config.volume_step,
            active: None,
            video_playing: false,
        }
    }

    /// Whether the last play/pause event came from a playing video.
    pub fn video_playing(&self) -> bool {
        self.video_playing
    }

    pub fn active_player(&self) -> Option<ElementId> {
        self.active
    }

    /// Enhance every video on the page. Returns how many were new.
    pub fn enhance_videos<P: HostPage + ?Sized>(&mut self, page: &mut P) -> usize {
        let videos: Vec<ElementId> = page
            .elements()
            .into_iter()
            .filter(|id| is_video(&*page, *id))
            .collect();
        let mut enhanced = 0;
        for video in videos {
            if self.enhance_video(page, video) {
                enhanced += 1;
            }
        }
        enhanced
    }

    /// Mark a video and start listening to its media events, once.
    pub fn enhance_video<P: HostPage + ?Sized>(&mut self, page: &mut P, video: ElementId) -> bool {
        if page.attribute(video, ENHANCED_ATTR).is_some() {
            return false;
        }
        page.set_attribute(video, ENHANCED_ATTR, "true");
        page.listen_media(video);
        if self.active.is_none() {
            self.active = Some(video);
        }
        debug!("Enhanced video {}", video);
        true
    }

    pub fn is_enhanced<P: HostPage + ?Sized>(page: &P, video: ElementId) -> bool {
        page.attribute(video, ENHANCED_ATTR).is_some()
    }

    /// Track play/pause of enhanced videos.
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event.kind {
            MediaEventKind::Play => {
                self.video_playing = true;
                self.active = Some(event.target);
            }
            MediaEventKind::Pause => self.video_playing = false,
        }
        trace!("Media {:?} on {}", event.kind, event.target);
    }

    /// Keys received by a focused video element. Returns whether the key was consumed.
    pub fn handle_video_key<P: HostPage + ?Sized>(
        &self,
        page: &mut P,
        video: ElementId,
        key: &KeyEvent,
    ) -> bool {
        match (key.key.as_str(), key.ctrl) {
            (" " | "MediaPlay" | "MediaPause", _) => self.toggle_play_pause(page, video),
            ("ArrowLeft", true) => self.rewind(page, video),
            ("ArrowRight", true) => self.fast_forward(page, video),
            ("ArrowUp", true) => self.adjust_volume(page, video, self.volume_step),
            ("ArrowDown", true) => self.adjust_volume(page, video, -self.volume_step),
            _ => return false,
        }
        true
    }

    /// Global transport keys. Returns whether a video was targeted.
    pub fn handle_media_key<P: HostPage + ?Sized>(
        &self,
        page: &mut P,
        key: MediaKey,
        hint: Option<ElementId>,
    ) -> bool {
        let Some(video) = self.resolve_target(&*page, hint) else {
            trace!("No video for {:?}", key);
            return false;
        };
        match key {
            MediaKey::Play | MediaKey::Pause | MediaKey::PlayPause => {
                self.toggle_play_pause(page, video)
            }
            MediaKey::Stop => self.stop(page, video),
            MediaKey::Rewind => self.rewind(page, video),
            MediaKey::FastForward => self.fast_forward(page, video),
            MediaKey::VolumeUp => self.adjust_volume(page, video, self.volume_step),
            MediaKey::VolumeDown => self.adjust_volume(page, video, -self.volume_step),
            MediaKey::VolumeMute => self.toggle_mute(page, video),
        }
        true
    }

    /// The key's own video, else the active player, else the first video.
    pub fn resolve_target<P: HostPage + ?Sized>(
        &self,
        page: &P,
        hint: Option<ElementId>,
    ) -> Option<ElementId> {
        hint.filter(|id| is_video(page, *id))
            .or_else(|| self.active.filter(|id| is_video(page, *id)))
            .or_else(|| page.elements().into_iter().find(|id| is_video(page, *id)))
    }

    pub fn toggle_play_pause<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId) {
        let Some(state) = page.media_state(video) else {
            return;
        };
        if state.paused {
            page.play(video);
        } else {
            page.pause(video);
        }
    }

    /// Pause and seek to the start.
    pub fn stop<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId) {
        if page.media_state(video).is_none() {
            return;
        }
        page.pause(video);
        page.set_current_time(video, 0.0);
    }

    pub fn rewind<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId) {
        if let Some(state) = page.media_state(video) {
            page.set_current_time(video, (state.current_time - self.seek_step).max(0.0));
        }
    }

    /// Seek forward, clamped to the duration when it is known.
    pub fn fast_forward<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId) {
        if let Some(state) = page.media_state(video) {
            let target = state.current_time + self.seek_step;
            let target = match state.duration {
                Some(duration) => target.min(duration),
                None => target,
            };
            page.set_current_time(video, target);
        }
    }

    pub fn adjust_volume<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId, delta: f64) {
        if let Some(state) = page.media_state(video) {
            page.set_volume(video, (state.volume + delta).clamp(0.0, 1.0));
        }
    }

    pub fn toggle_mute<P: HostPage + ?Sized>(&self, page: &mut P, video: ElementId) {
        if let Some(state) = page.media_state(video) {
            page.set_muted(video, !state.muted);
        }
    }
}

fn is_video<P: HostPage + ?Sized>(page: &P, id: ElementId) -> bool {
    page.tag_name(id).as_deref() == Some("video")
}

#[cfg(test)]
#[path = "playback_tests.rs"]
mod tests;
