//! Device capability flags computed once at boot and shared by every controller.

use crate::core::config::LandingConfig;

/// Core count below which a device is considered low-performance.
pub const MIN_CORES: f64 = 4.0;
/// Device memory (GiB) below which a device is considered low-performance.
pub const MIN_MEMORY_GB: f64 = 4.0;

/// Raw environment readings gathered by the browser probe.
///
/// Every field is optional or defaults to the permissive answer so a probe that
/// cannot read a feature never degrades the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceProbe {
    /// `navigator.hardwareConcurrency` when exposed.
    pub hardware_concurrency: Option<f64>,
    /// `navigator.deviceMemory` when exposed.
    pub device_memory_gb: Option<f64>,
    /// `(max-width: 768px)` matched.
    pub narrow_viewport: bool,
    /// `(prefers-reduced-motion: reduce)` matched.
    pub prefers_reduced_motion: bool,
    /// `(hover: none) and (pointer: coarse)` matched.
    pub coarse_pointer: bool,
    /// `(hover: hover) and (pointer: fine)` matched.
    pub fine_hover: bool,
    /// Browser honoured the `passive` listener option.
    pub passive_listeners: bool,
    /// `IntersectionObserver` exists on the window.
    pub intersection_observer: bool,
}

/// Immutable capability context passed into each controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Few cores, little memory or a narrow viewport.
    pub low_performance: bool,
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// Coarse pointer without hover (phones, tablets).
    pub mobile: bool,
    /// Precise pointer with hover.
    pub fine_hover: bool,
    /// Passive listeners are supported.
    pub passive_listeners: bool,
    /// `IntersectionObserver` is available.
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::from_probe(&DeviceProbe::default())
    }
}

/// True when the hardware readings indicate a slow device.
#[must_use]
pub fn is_slow_device(hardware_concurrency: Option<f64>, device_memory_gb: Option<f64>) -> bool {
    hardware_concurrency.is_some_and(|cores| cores < MIN_CORES)
        || device_memory_gb.is_some_and(|memory| memory < MIN_MEMORY_GB)
}

impl Capabilities {
    /// Classify the probe readings.
    #[must_use]
    pub fn from_probe(probe: &DeviceProbe) -> Self {
        let low_performance =
            is_slow_device(probe.hardware_concurrency, probe.device_memory_gb)
                || probe.narrow_viewport;
        Self {
            low_performance,
            reduced_motion: probe.prefers_reduced_motion,
            mobile: probe.coarse_pointer,
            fine_hover: probe.fine_hover,
            passive_listeners: probe.passive_listeners,
            intersection_observer: probe.intersection_observer,
        }
    }

    /// Pick the low-performance variant of a setting when applicable.
    #[must_use]
    pub fn tiered<T: Copy>(&self, low_perf: T, normal: T) -> T {
        if self.low_performance { low_perf } else { normal }
    }

    /// Pick the mobile variant of a setting when applicable.
    #[must_use]
    pub fn on_mobile<T: Copy>(&self, mobile: T, desktop: T) -> T {
        if self.mobile { mobile } else { desktop }
    }

    /// Expensive chart effects are skipped on slow devices and for reduced motion.
    #[must_use]
    pub const fn simplified(&self) -> bool {
        self.low_performance || self.reduced_motion
    }

    /// Smooth scrolling is used unless motion is reduced or the device is slow.
    #[must_use]
    pub const fn smooth_scroll(&self) -> bool {
        !self.simplified()
    }

    /// Blob parallax needs a fine hover pointer and a capable device.
    #[must_use]
    pub const fn parallax_enabled(&self) -> bool {
        !self.reduced_motion && !self.mobile && self.fine_hover && !self.low_performance
    }

    /// Magnetic buttons are a desktop-only nicety.
    #[must_use]
    pub const fn magnetic_enabled(&self) -> bool {
        !self.mobile && !self.reduced_motion && !self.low_performance
    }

    /// Carousel auto-advance runs only on capable, non-touch devices.
    #[must_use]
    pub const fn auto_advance_enabled(&self) -> bool {
        !self.reduced_motion && !self.mobile && !self.low_performance
    }

    /// Minimum preloader display time.
    #[must_use]
    pub const fn preloader_min_ms(&self, config: &LandingConfig) -> u32 {
        let preloader = &config.preloader;
        if self.low_performance {
            preloader.min_low_perf_ms
        } else if self.reduced_motion {
            preloader.min_reduced_motion_ms
        } else {
            preloader.min_ms
        }
    }

    /// Maximum preloader display time.
    #[must_use]
    pub fn preloader_max_ms(&self, config: &LandingConfig) -> u32 {
        self.tiered(config.preloader.max_low_perf_ms, config.preloader.max_ms)
    }
}
