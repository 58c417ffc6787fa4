//! Two-permit join that decides when the splash screen may end.

use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;

/// Why the preloader ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Both the minimum display time and resource readiness arrived.
    Joined,
    /// The maximum display time fired first.
    Timeout,
}

/// Tracks the minimum-time and resources-ready permits.
///
/// The splash ends exactly once: when both permits are present, or when the
/// fallback timer forces it, whichever comes first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreloaderGate {
    min_elapsed: bool,
    ready: bool,
    ended: bool,
}

impl PreloaderGate {
    /// Fresh gate with no permits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_elapsed: false,
            ready: false,
            ended: false,
        }
    }

    /// Record that the minimum display time has elapsed.
    pub fn min_time_elapsed(&mut self) -> Option<EndReason> {
        self.min_elapsed = true;
        self.check()
    }

    /// Record that the critical resources are ready.
    pub fn resources_ready(&mut self) -> Option<EndReason> {
        self.ready = true;
        self.check()
    }

    /// Fallback timer fired; end unless already ended.
    pub fn force(&mut self) -> Option<EndReason> {
        if self.ended {
            return None;
        }
        self.ended = true;
        Some(EndReason::Timeout)
    }

    /// Whether the end transition already ran.
    #[cfg(test)]
    pub(crate) const fn ended(&self) -> bool {
        self.ended
    }

    fn check(&mut self) -> Option<EndReason> {
        if !self.ended && self.min_elapsed && self.ready {
            self.ended = true;
            return Some(EndReason::Joined);
        }
        None
    }
}

/// Effective preloader timings for a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreloaderTimings {
    /// Minimum display time.
    pub min_ms: u32,
    /// Forced end.
    pub max_ms: u32,
    /// Cap on waiting for resources.
    pub resources_cap_ms: u32,
    /// Delay between the bar fill and the fade.
    pub fade_delay_ms: u32,
    /// Fade duration before removal.
    pub removal_ms: u32,
    /// Whether fonts and preload images are awaited in addition to `load`.
    pub await_assets: bool,
}

impl PreloaderTimings {
    /// Derive the timings for the given device.
    #[must_use]
    pub fn for_device(caps: &Capabilities, config: &LandingConfig) -> Self {
        let preloader = &config.preloader;
        Self {
            min_ms: caps.preloader_min_ms(config),
            max_ms: caps.preloader_max_ms(config),
            resources_cap_ms: preloader.resources_cap_ms,
            fade_delay_ms: preloader.fade_delay_ms,
            removal_ms: caps.tiered(preloader.removal_low_perf_ms, preloader.removal_ms),
            await_assets: !caps.low_performance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::DeviceProbe;

    #[test]
    fn ends_only_after_both_permits_in_either_order() {
        let mut gate = PreloaderGate::new();
        assert_eq!(gate.min_time_elapsed(), None);
        assert_eq!(gate.resources_ready(), Some(EndReason::Joined));

        let mut gate = PreloaderGate::new();
        assert_eq!(gate.resources_ready(), None);
        assert_eq!(gate.min_time_elapsed(), Some(EndReason::Joined));
    }

    #[test]
    fn ends_at_most_once() {
        let mut gate = PreloaderGate::new();
        gate.min_time_elapsed();
        gate.resources_ready();
        assert_eq!(gate.force(), None);
        assert_eq!(gate.resources_ready(), None);
        assert!(gate.ended());
    }

    #[test]
    fn fallback_wins_when_resources_stall() {
        let mut gate = PreloaderGate::new();
        gate.min_time_elapsed();
        assert_eq!(gate.force(), Some(EndReason::Timeout));
        assert_eq!(gate.resources_ready(), None);
    }

    #[test]
    fn slow_devices_skip_asset_waits_and_fade_faster() {
        let config = LandingConfig::default();
        let slow = Capabilities::from_probe(&DeviceProbe {
            device_memory_gb: Some(1.0),
            ..DeviceProbe::default()
        });
        let timings = PreloaderTimings::for_device(&slow, &config);
        assert!(!timings.await_assets);
        assert_eq!(timings.removal_ms, 300);
        assert_eq!(timings.min_ms, 800);

        let fast = PreloaderTimings::for_device(&Capabilities::default(), &config);
        assert!(fast.await_assets);
        assert_eq!(fast.removal_ms, 550);
    }
}
