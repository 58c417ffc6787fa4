//! Reveal-on-scroll observer options.

use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;

/// Intersection observer settings for `.reveal` elements.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPlan {
    /// Intersection ratio that triggers the `show` class.
    pub threshold: f64,
    /// Root margin in CSS syntax.
    pub root_margin: String,
    /// Stop observing an element once shown.
    pub unobserve_after_show: bool,
    /// Delay before observation starts.
    pub delay_ms: u32,
    /// Without an observer every element is shown immediately.
    pub show_all_immediately: bool,
}

impl RevealPlan {
    /// Derive the plan for a device.
    #[must_use]
    pub fn for_device(caps: &Capabilities, config: &LandingConfig) -> Self {
        let reveal = &config.reveal;
        let margin = caps.tiered(reveal.root_margin_low_perf_px, reveal.root_margin_px);
        Self {
            threshold: caps.tiered(reveal.threshold_low_perf, reveal.threshold),
            root_margin: format!("{margin}px"),
            unobserve_after_show: caps.low_performance,
            delay_ms: caps.tiered(reveal.delay_low_perf_ms, reveal.delay_ms),
            show_all_immediately: !caps.intersection_observer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capable_device_keeps_observing() {
        let caps = Capabilities {
            intersection_observer: true,
            ..Capabilities::default()
        };
        let plan = RevealPlan::for_device(&caps, &LandingConfig::default());
        assert_eq!(plan.root_margin, "100px");
        assert!(!plan.unobserve_after_show);
        assert!(!plan.show_all_immediately);
        assert_eq!(plan.delay_ms, 100);
    }

    #[test]
    fn slow_device_uses_lighter_observer() {
        let caps = Capabilities {
            low_performance: true,
            intersection_observer: true,
            ..Capabilities::default()
        };
        let plan = RevealPlan::for_device(&caps, &LandingConfig::default());
        assert!((plan.threshold - 0.05).abs() < f64::EPSILON);
        assert_eq!(plan.root_margin, "50px");
        assert!(plan.unobserve_after_show);
        assert_eq!(plan.delay_ms, 500);
    }

    #[test]
    fn missing_observer_shows_everything() {
        let plan = RevealPlan::for_device(&Capabilities::default(), &LandingConfig::default());
        assert!(plan.show_all_immediately);
    }
}
