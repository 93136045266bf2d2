//! Auto-scroll bookkeeping for the log view.
//!
//! # Design
//! - The view stays pinned to the newest line unless the user scrolls away.
//! - Scrolling back to the bottom, or pressing the scroll button, re-pins.
//! - Opening the logs page runs a short burst of follow-up scrolls so late
//!   layout still ends at the bottom.

/// Distance from the bottom, in pixels, still treated as "at the bottom".
pub const BOTTOM_TOLERANCE_PX: i32 = 10;
/// Follow-up scrolls after switching to the logs page.
pub const BURST_TICKS: u8 = 5;
/// Spacing between follow-up scrolls.
pub const BURST_INTERVAL_MS: u32 = 200;

/// Whether a scroll container is at (or within tolerance of) its bottom.
#[must_use]
pub const fn is_at_bottom(scroll_top: i32, client_height: i32, scroll_height: i32) -> bool {
    scroll_top.saturating_add(client_height) >= scroll_height.saturating_sub(BOTTOM_TOLERANCE_PX)
}

/// Pinning state of the log view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoScroll {
    pinned: bool,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self { pinned: true }
    }
}

impl AutoScroll {
    /// Whether new content should scroll the view.
    #[must_use]
    pub const fn is_pinned(self) -> bool {
        self.pinned
    }

    /// Record a scroll event with the container's current geometry.
    pub const fn observe(&mut self, scroll_top: i32, client_height: i32, scroll_height: i32) {
        self.pinned = is_at_bottom(scroll_top, client_height, scroll_height);
    }

    /// Explicitly re-pin (scroll button, fresh connection).
    pub const fn pin(&mut self) {
        self.pinned = true;
    }
}

/// Outcome of one follow-up tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstTick {
    /// Scroll to the bottom now.
    Scroll,
    /// The user scrolled away; leave the view alone.
    Skip,
    /// No ticks remain; stop the timer.
    Finished,
}

/// Countdown for the follow-up scrolls after opening the logs page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollBurst {
    remaining: u8,
}

impl Default for ScrollBurst {
    fn default() -> Self {
        Self {
            remaining: BURST_TICKS,
        }
    }
}

impl ScrollBurst {
    /// Advance one tick given the current pinning state.
    pub const fn tick(&mut self, scroll: AutoScroll) -> BurstTick {
        if self.remaining == 0 {
            return BurstTick::Finished;
        }
        self.remaining -= 1;
        if scroll.is_pinned() {
            BurstTick::Scroll
        } else {
            BurstTick::Skip
        }
    }

    /// Whether every tick has run.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.remaining == 0
    }
}
