//! Seamless logo marquee planning.

use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;

/// Attribute that marks a pill as a clone created by the marquee.
pub const CLONE_MARKER: &str = "data-marquee-clone";

/// What the marquee controller should do with a track.
#[derive(Clone, Debug, PartialEq)]
pub struct MarqueePlan {
    /// Existing clones to remove before cloning again.
    pub remove_clones: usize,
    /// Original pills to clone (each once).
    pub clone_count: usize,
    /// CSS animation shorthand, `None` when motion is reduced.
    pub animation: Option<String>,
    /// Pause on hover.
    pub pause_on_hover: bool,
}

/// Loop duration in seconds for `count` pills of width `item_width`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn loop_duration_s(item_width: f64, count: usize, caps: &Capabilities, config: &LandingConfig) -> f64 {
    let marquee = &config.marquee;
    let total_width = (item_width + marquee.gap_px) * count as f64;
    let speed = caps.tiered(marquee.speed_low_perf_px_s, marquee.speed_px_s);
    (total_width / speed).max(marquee.min_duration_s)
}

impl MarqueePlan {
    /// Plan a (re-)initialisation.
    ///
    /// `originals` counts pills without the clone marker and `clones` those
    /// with it, so running the plan any number of times leaves exactly one
    /// clone per original.
    #[must_use]
    pub fn new(
        originals: usize,
        clones: usize,
        item_width: Option<f64>,
        caps: &Capabilities,
        config: &LandingConfig,
    ) -> Self {
        let width = item_width
            .filter(|width| *width > 0.0)
            .unwrap_or(config.marquee.fallback_item_px);
        let duration = loop_duration_s(width, originals, caps, config);
        Self {
            remove_clones: clones,
            clone_count: if caps.low_performance { 0 } else { originals },
            animation: (!caps.reduced_motion).then(|| format!("marquee {duration}s linear infinite")),
            pause_on_hover: !caps.mobile,
        }
    }

    /// Pills in the track after the plan is applied.
    #[cfg(test)]
    pub(crate) const fn resulting_len(&self, originals: usize) -> usize {
        originals + self.clone_count
    }
}
