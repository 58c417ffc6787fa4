//! Cases carousel: whole-card stepping, drag-to-scroll, auto-advance and progress.

use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;

/// Fraction of the overflow scrolled, in `[0, 1]`; `1` when nothing overflows.
#[must_use]
pub fn progress_fraction(scroll_left: f64, scroll_width: f64, client_width: f64) -> f64 {
    let max = scroll_width - client_width;
    if max <= 0.0 {
        return 1.0;
    }
    (scroll_left / max).clamp(0.0, 1.0)
}

/// Horizontal scroll container the carousel drives.
pub trait ScrollTrack {
    /// Current horizontal offset.
    fn scroll_left(&self) -> f64;
    /// Total scrollable width.
    fn scroll_width(&self) -> f64;
    /// Visible width.
    fn client_width(&self) -> f64;
    /// Measured width of one card, when a card exists.
    fn card_width(&self) -> Option<f64>;
    /// Scroll relative to the current offset.
    fn scroll_by(&mut self, delta: f64, smooth: bool);
    /// Scroll to an absolute offset.
    fn scroll_to(&mut self, left: f64, smooth: bool);
    /// Jump to an absolute offset without animation.
    fn set_scroll_left(&mut self, left: f64);
}

/// Outcome of one auto-advance tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoStep {
    /// Advanced by one card.
    Advanced,
    /// At (or within tolerance of) the end; rewound to the start.
    Rewound,
    /// A previous advance was still settling.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragStart {
    x: f64,
    scroll_left: f64,
}

/// Carousel controller state over a [`ScrollTrack`].
#[derive(Debug)]
pub struct Carousel<T> {
    track: T,
    gap: f64,
    fallback_card: f64,
    guard_ms: f64,
    end_tolerance: f64,
    drag_factor: f64,
    smooth: bool,
    auto_enabled: bool,
    auto_running: bool,
    busy_until: Option<f64>,
    drag: Option<DragStart>,
}

impl<T: ScrollTrack> Carousel<T> {
    /// Build a carousel for the given device.
    pub fn new(track: T, caps: &Capabilities, config: &LandingConfig) -> Self {
        let carousel = &config.carousel;
        Self {
            track,
            gap: carousel.gap_px,
            fallback_card: carousel.fallback_card_px,
            guard_ms: f64::from(carousel.guard_ms),
            end_tolerance: carousel.end_tolerance_px,
            drag_factor: carousel.drag_factor,
            smooth: caps.smooth_scroll(),
            auto_enabled: caps.auto_advance_enabled(),
            auto_running: false,
            busy_until: None,
            drag: None,
        }
    }

    /// Borrow the track.
    pub const fn track(&self) -> &T {
        &self.track
    }

    /// Distance of one whole-card step.
    pub fn step(&self) -> f64 {
        self.track
            .card_width()
            .filter(|width| *width > 0.0)
            .unwrap_or(self.fallback_card)
            + self.gap
    }

    /// Scroll one card in `direction` (`-1` or `1`).
    ///
    /// Returns `false` when dropped by the re-entrancy guard.
    pub fn advance(&mut self, direction: f64, now_ms: f64) -> bool {
        if self.busy_until.is_some_and(|until| now_ms < until) {
            return false;
        }
        let delta = direction.signum() * self.step();
        self.track.scroll_by(delta, self.smooth);
        self.busy_until = Some(now_ms + self.guard_ms);
        true
    }

    /// Current progress fraction.
    pub fn progress(&self) -> f64 {
        progress_fraction(
            self.track.scroll_left(),
            self.track.scroll_width(),
            self.track.client_width(),
        )
    }

    /// One auto-advance period elapsed.
    pub fn auto_tick(&mut self, now_ms: f64) -> AutoStep {
        let max = self.track.scroll_width() - self.track.client_width();
        if self.track.scroll_left() >= max - self.end_tolerance {
            self.track.scroll_to(0.0, true);
            return AutoStep::Rewound;
        }
        if self.advance(1.0, now_ms) {
            AutoStep::Advanced
        } else {
            AutoStep::Skipped
        }
    }

    /// Touch began at page x `page_x` on a track whose left edge is `offset_left`.
    pub fn touch_start(&mut self, page_x: f64, offset_left: f64) {
        self.drag = Some(DragStart {
            x: page_x - offset_left,
            scroll_left: self.track.scroll_left(),
        });
    }

    /// Touch moved. Returns `true` when the drag was applied and native
    /// scrolling must be suppressed.
    pub fn touch_move(&mut self, page_x: f64, offset_left: f64) -> bool {
        let Some(start) = self.drag else {
            return false;
        };
        let walk = (page_x - offset_left - start.x) * self.drag_factor;
        self.track.set_scroll_left(start.scroll_left - walk);
        true
    }

    /// Touch ended.
    pub fn touch_end(&mut self) {
        self.drag = None;
    }

    /// Whether auto-advance is allowed on this device.
    pub const fn auto_enabled(&self) -> bool {
        self.auto_enabled
    }

    /// Request auto-advance. Returns `true` when a timer must be started.
    pub fn start_auto(&mut self) -> bool {
        if !self.auto_enabled || self.auto_running {
            return false;
        }
        self.auto_running = true;
        true
    }

    /// Suspend auto-advance. Returns `true` when a running timer must be dropped.
    pub fn stop_auto(&mut self) -> bool {
        std::mem::replace(&mut self.auto_running, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeTrack {
        left: f64,
        scroll_width: f64,
        client_width: f64,
        card: Option<f64>,
        last_smooth: Option<bool>,
    }

    impl FakeTrack {
        fn max(&self) -> f64 {
            (self.scroll_width - self.client_width).max(0.0)
        }
    }

    impl ScrollTrack for FakeTrack {
        fn scroll_left(&self) -> f64 {
            self.left
        }
        fn scroll_width(&self) -> f64 {
            self.scroll_width
        }
        fn client_width(&self) -> f64 {
            self.client_width
        }
        fn card_width(&self) -> Option<f64> {
            self.card
        }
        fn scroll_by(&mut self, delta: f64, smooth: bool) {
            self.last_smooth = Some(smooth);
            self.left = (self.left + delta).clamp(0.0, self.max());
        }
        fn scroll_to(&mut self, left: f64, smooth: bool) {
            self.last_smooth = Some(smooth);
            self.left = left.clamp(0.0, self.max());
        }
        fn set_scroll_left(&mut self, left: f64) {
            self.left = left.clamp(0.0, self.max());
        }
    }

    fn desktop() -> Capabilities {
        Capabilities {
            fine_hover: true,
            ..Capabilities::default()
        }
    }

    fn carousel(card: Option<f64>) -> Carousel<FakeTrack> {
        Carousel::new(
            FakeTrack {
                scroll_width: 2000.0,
                client_width: 700.0,
                card,
                ..FakeTrack::default()
            },
            &desktop(),
            &LandingConfig::default(),
        )
    }

    #[test]
    fn no_overflow_is_full_progress() {
        assert!((progress_fraction(0.0, 500.0, 500.0) - 1.0).abs() < f64::EPSILON);
        assert!((progress_fraction(250.0, 500.0, 500.0) - 1.0).abs() < f64::EPSILON);
        assert!((progress_fraction(0.0, 400.0, 500.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_clamped() {
        assert!((progress_fraction(650.0, 2000.0, 700.0) - 0.5).abs() < f64::EPSILON);
        assert!((progress_fraction(9000.0, 2000.0, 700.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_from_start_moves_one_card_plus_gap() {
        let mut carousel = carousel(Some(320.0));
        assert_eq!(carousel.auto_tick(4000.0), AutoStep::Advanced);
        assert!((carousel.track().left - 334.0).abs() < f64::EPSILON);
        assert_eq!(carousel.track().last_smooth, Some(true));
    }

    #[test]
    fn tick_at_end_rewinds() {
        let mut carousel = carousel(Some(320.0));
        let mut now = 0.0;
        while carousel.track().left < 1300.0 - 10.0 {
            now += 4000.0;
            assert_eq!(carousel.auto_tick(now), AutoStep::Advanced);
        }
        now += 4000.0;
        assert_eq!(carousel.auto_tick(now), AutoStep::Rewound);
        assert!(carousel.track().left.abs() < f64::EPSILON);
    }

    #[test]
    fn guard_drops_rapid_advances() {
        let mut carousel = carousel(None);
        assert!(carousel.advance(1.0, 0.0));
        assert!(!carousel.advance(1.0, 120.0));
        assert!((carousel.track().left - 354.0).abs() < f64::EPSILON);
        assert!(carousel.advance(-1.0, 300.0));
        assert!(carousel.track().left.abs() < f64::EPSILON);
    }

    #[test]
    fn drag_is_amplified_and_inverted() {
        let mut carousel = carousel(Some(320.0));
        carousel.track.left = 400.0;
        assert!(!carousel.touch_move(10.0, 0.0));
        carousel.touch_start(200.0, 20.0);
        assert!(carousel.touch_move(150.0, 20.0));
        assert!((carousel.track().left - 500.0).abs() < f64::EPSILON);
        carousel.touch_end();
        assert!(!carousel.touch_move(100.0, 20.0));
    }

    #[test]
    fn auto_timer_bookkeeping() {
        let mut carousel = carousel(Some(320.0));
        assert!(carousel.start_auto());
        assert!(!carousel.start_auto());
        assert!(carousel.stop_auto());
        assert!(!carousel.stop_auto());
        assert!(carousel.start_auto());
    }

    #[test]
    fn reduced_motion_disables_auto_and_smoothing() {
        let caps = Capabilities {
            reduced_motion: true,
            ..desktop()
        };
        let mut carousel = Carousel::new(
            FakeTrack {
                scroll_width: 2000.0,
                client_width: 700.0,
                ..FakeTrack::default()
            },
            &caps,
            &LandingConfig::default(),
        );
        assert!(!carousel.auto_enabled());
        assert!(!carousel.start_auto());
        carousel.advance(1.0, 0.0);
        assert_eq!(carousel.track().last_smooth, Some(false));
    }
}
