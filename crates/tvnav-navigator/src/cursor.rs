//! Pointer cursor hiding.

use std::time::Duration;

use tokio::time::Instant;
use tvnav_dom::{CursorStyle, HostPage};

/// Hides the body cursor after a period without pointer movement.
///
/// Each pointer move shows the cursor and re-arms a single deadline; the
/// controller calls [`CursorHider::on_deadline`] once it passes.
#[derive(Debug, Clone)]
pub struct CursorHider {
    enabled: bool,
    hide_after: Duration,
    deadline: Option<Instant>,
}

impl CursorHider {
    pub fn new(enabled: bool, hide_after: Duration) -> Self {
        Self {
            enabled,
            hide_after,
            deadline: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Hide the cursor immediately.
    pub fn start<P: HostPage + ?Sized>(&mut self, page: &mut P) {
        if self.enabled {
            page.set_body_cursor(CursorStyle::None);
        }
    }

    /// Show the cursor and restart the hide timer.
    pub fn on_pointer_move<P: HostPage + ?Sized>(&mut self, page: &mut P, now: Instant) {
        if !self.enabled {
            return;
        }
        page.set_body_cursor(CursorStyle::Default);
        self.deadline = Some(now + self.hide_after);
    }

    /// Hide the cursor if the deadline has passed. Returns whether it fired.
    pub fn on_deadline<P: HostPage + ?Sized>(&mut self, page: &mut P, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                page.set_body_cursor(CursorStyle::None);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvnav_dom::MemoryPage;

    #[test]
    fn test_pointer_move_rearms_deadline() {
        let mut page = MemoryPage::new();
        let mut hider = CursorHider::new(true, Duration::from_millis(3000));
        hider.start(&mut page);
        assert_eq!(page.body_cursor(), Some(CursorStyle::None));

        let t0 = Instant::now();
        hider.on_pointer_move(&mut page, t0);
        assert_eq!(page.body_cursor(), Some(CursorStyle::Default));
        hider.on_pointer_move(&mut page, t0 + Duration::from_millis(2000));

        assert!(!hider.on_deadline(&mut page, t0 + Duration::from_millis(3000)));
        assert_eq!(page.body_cursor(), Some(CursorStyle::Default));

        assert!(hider.on_deadline(&mut page, t0 + Duration::from_millis(5000)));
        assert_eq!(page.body_cursor(), Some(CursorStyle::None));
        assert_eq!(hider.deadline(), None);
    }

    #[test]
    fn test_disabled_hider_leaves_cursor_alone() {
        let mut page = MemoryPage::new();
        let mut hider = CursorHider::disabled();
        hider.start(&mut page);
        hider.on_pointer_move(&mut page, Instant::now());
        assert_eq!(page.body_cursor(), None);
        assert_eq!(hider.deadline(), None);
    }
}
