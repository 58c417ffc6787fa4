//! Page scroll progress and header tone.

/// Fraction of the document scrolled, in `[0, 1]`.
///
/// A document that cannot scroll uses a range of one pixel, so any offset maps
/// to a full bar and zero maps to an empty one.
#[must_use]
pub fn page_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let range = scroll_height - client_height;
    let range = if range == 0.0 { 1.0 } else { range };
    (scroll_top / range).clamp(0.0, 1.0)
}

/// CSS width for a progress fraction with the given number of decimals.
#[must_use]
pub fn percent_width(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Whether the header should switch to its scrolled tone.
#[must_use]
pub fn header_scrolled(scroll_top: f64, threshold: f64) -> bool {
    scroll_top > threshold
}

/// Leading-edge throttle: the first call in each window passes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throttle {
    window_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    /// Throttle with the given window.
    #[must_use]
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: f64::from(window_ms),
            last: None,
        }
    }

    /// Returns `true` when a call at `now_ms` should run.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}
