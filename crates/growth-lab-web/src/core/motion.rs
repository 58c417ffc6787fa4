//! Easing, tweening and damped-approach helpers shared by the animated controllers.

/// Cubic ease-out: fast start, gentle landing.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Integer tween between two readout values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: i64,
    to: i64,
    start_ms: f64,
    duration_ms: f64,
}

impl Tween {
    /// Tween from `from` to `to` starting at `start_ms`.
    #[must_use]
    pub fn new(from: i64, to: i64, start_ms: f64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: f64::from(duration_ms.max(1)),
        }
    }

    /// Normalised progress at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Rounded value at `now_ms`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn value_at(&self, now_ms: f64) -> i64 {
        let eased = ease_out_cubic(self.progress(now_ms));
        let delta = (self.to - self.from) as f64;
        self.from + (delta * eased).round() as i64
    }

    /// Whether the tween has reached its target.
    #[must_use]
    pub fn finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Move `current` a fraction of the way toward `target`.
#[must_use]
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Smoothed pointer position for the parallax loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    /// Latest pointer position.
    pub target: (f64, f64),
    /// Smoothed position.
    pub current: (f64, f64),
}

impl Follower {
    /// Advance one frame.
    pub fn step(&mut self, factor: f64) -> (f64, f64) {
        self.current = (
            approach(self.current.0, self.target.0, factor),
            approach(self.current.1, self.target.1, factor),
        );
        self.current
    }
}

/// Parallax offset of blob `index` for a smoothed pointer and viewport size.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parallax_offset(
    index: usize,
    depth_step: f64,
    pointer: (f64, f64),
    viewport: (f64, f64),
) -> (f64, f64) {
    let k = (index as f64 + 1.0) * depth_step;
    (
        (pointer.0 - viewport.0 / 2.0) * k,
        (pointer.1 - viewport.1 / 2.0) * k,
    )
}

/// Magnetic pull of a button toward the pointer.
#[must_use]
pub fn magnetic_offset(
    pointer: (f64, f64),
    rect_origin: (f64, f64),
    rect_size: (f64, f64),
    damp: f64,
) -> (f64, f64) {
    let dx = pointer.0 - (rect_origin.0 + rect_size.0 / 2.0);
    let dy = pointer.1 - (rect_origin.1 + rect_size.1 / 2.0);
    (dx * damp, dy * damp)
}

/// Parse the integer part of a readout such as `+45%`.
#[must_use]
pub fn parse_readout(text: &str) -> i64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_hits_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert!((ease_out_cubic(3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tween_lands_on_target() {
        let tween = Tween::new(12, 92, 1000.0, 420);
        assert_eq!(tween.value_at(1000.0), 12);
        assert_eq!(tween.value_at(1210.0), 82);
        assert_eq!(tween.value_at(1420.0), 92);
        assert!(tween.finished(1420.0));
        assert!(!tween.finished(1419.0));
    }

    #[test]
    fn tween_can_count_down() {
        let tween = Tween::new(92, 8, 0.0, 300);
        assert_eq!(tween.value_at(0.0), 92);
        assert_eq!(tween.value_at(300.0), 8);
    }

    #[test]
    fn follower_closes_the_gap() {
        let mut follower = Follower {
            target: (100.0, 50.0),
            ..Follower::default()
        };
        let first = follower.step(0.08);
        assert!((first.0 - 8.0).abs() < 1e-9);
        assert!((first.1 - 4.0).abs() < 1e-9);
        for _ in 0..200 {
            follower.step(0.08);
        }
        assert!((follower.current.0 - 100.0).abs() < 1e-3);
    }

    #[test]
    fn deeper_blobs_move_further() {
        let near = parallax_offset(0, 0.015, (600.0, 400.0), (1000.0, 800.0));
        let far = parallax_offset(2, 0.015, (600.0, 400.0), (1000.0, 800.0));
        assert!((near.0 - 1.5).abs() < 1e-9);
        assert!((far.0 - 4.5).abs() < 1e-9);
        assert!(near.1.abs() < 1e-9);
    }

    #[test]
    fn magnet_pulls_toward_pointer() {
        let (dx, dy) = magnetic_offset((150.0, 40.0), (100.0, 20.0), (100.0, 40.0), 0.1);
        assert!(dx.abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
        let (dx, _) = magnetic_offset((200.0, 40.0), (100.0, 20.0), (100.0, 40.0), 0.12);
        assert!((dx - 6.0).abs() < 1e-9);
    }

    #[test]
    fn readout_parsing_ignores_decoration() {
        assert_eq!(parse_readout("+45%"), 45);
        assert_eq!(parse_readout(""), 0);
        assert_eq!(parse_readout("n/a"), 0);
    }
}
