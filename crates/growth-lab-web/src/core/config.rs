//! Tunable timings and dimensions for every landing-page controller.
//!
//! Defaults match the shipped page. A page may embed a partial JSON object in
//! `<script id="landing-config" type="application/json">`; any field it names
//! overrides the default, everything else keeps its default value.

use serde::Deserialize;

use crate::core::error::{ConfigError, ConfigResult};

/// Local-storage key used for the theme flag when nothing overrides it.
pub const DEFAULT_THEME_KEY: &str = "growth-lab-theme";

/// Element id of the embedded JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Root configuration consumed by [`crate::core::capability::Capabilities`] and
/// every controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct LandingConfig {
    /// Theme persistence settings.
    pub theme: ThemeConfig,
    /// Preloader timings.
    pub preloader: PreloaderConfig,
    /// Scroll progress and header settings.
    pub scroll: ScrollConfig,
    /// Simulated form submission timings.
    pub forms: FormConfig,
    /// Clipboard feedback timings.
    pub clipboard: ClipboardConfig,
    /// Reveal-on-scroll observer settings.
    pub reveal: RevealConfig,
    /// Parallax and magnetic decoration settings.
    pub decor: DecorConfig,
    /// Cases carousel settings.
    pub carousel: CarouselConfig,
    /// Growth chart settings.
    pub chart: ChartConfig,
    /// Logo marquee settings.
    pub marquee: MarqueeConfig,
    /// Document-level boot markers.
    pub boot: BootConfig,
}

/// Theme persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Local-storage key holding `light` or `dark`.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

/// Preloader timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Minimum splash time on capable devices.
    pub min_ms: u32,
    /// Minimum splash time when reduced motion is requested.
    pub min_reduced_motion_ms: u32,
    /// Minimum splash time on low-performance devices.
    pub min_low_perf_ms: u32,
    /// Hard upper bound after which the splash ends regardless of readiness.
    pub max_ms: u32,
    /// Hard upper bound on low-performance devices.
    pub max_low_perf_ms: u32,
    /// Cap on waiting for critical resources.
    pub resources_cap_ms: u32,
    /// Delay between filling the bar and starting the fade.
    pub fade_delay_ms: u32,
    /// Fade duration before the node is removed.
    pub removal_ms: u32,
    /// Fade duration on low-performance devices.
    pub removal_low_perf_ms: u32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_ms: 1500,
            min_reduced_motion_ms: 500,
            min_low_perf_ms: 800,
            max_ms: 4500,
            max_low_perf_ms: 4000,
            resources_cap_ms: 2000,
            fade_delay_ms: 80,
            removal_ms: 550,
            removal_low_perf_ms: 300,
        }
    }
}

/// Scroll progress and header tone settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll offset past which the header gets the `scrolled` class.
    pub header_threshold_px: f64,
    /// Throttle window for scroll handling.
    pub throttle_ms: u32,
    /// Throttle window on low-performance devices.
    pub throttle_low_perf_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold_px: 16.0,
            throttle_ms: 16,
            throttle_low_perf_ms: 100,
        }
    }
}

/// Simulated form submission timings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fake network delay.
    pub submit_delay_ms: u32,
    /// Fake network delay on low-performance devices.
    pub submit_delay_low_perf_ms: u32,
    /// Time the accepted state stays visible before the modal closes.
    pub close_after_ms: u32,
    /// Time after closing before the button and form are restored.
    pub reset_after_ms: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1200,
            submit_delay_low_perf_ms: 800,
            close_after_ms: 1000,
            reset_after_ms: 300,
        }
    }
}

/// Clipboard feedback timings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// How long the "copied" label stays on the button.
    pub feedback_ms: u32,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { feedback_ms: 1500 }
    }
}

/// Reveal-on-scroll observer settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Intersection ratio that triggers a reveal.
    pub threshold: f64,
    /// Intersection ratio on low-performance devices.
    pub threshold_low_perf: f64,
    /// Observer root margin.
    pub root_margin_px: u32,
    /// Observer root margin on low-performance devices.
    pub root_margin_low_perf_px: u32,
    /// Delay before the observer is attached.
    pub delay_ms: u32,
    /// Delay on low-performance devices.
    pub delay_low_perf_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            threshold_low_perf: 0.05,
            root_margin_px: 100,
            root_margin_low_perf_px: 50,
            delay_ms: 100,
            delay_low_perf_ms: 500,
        }
    }
}

/// Parallax blobs and magnetic buttons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    /// Delay before the parallax loop starts.
    pub parallax_delay_ms: u32,
    /// Fraction of the remaining distance covered per frame.
    pub approach: f64,
    /// Depth multiplier added per blob index.
    pub depth_step: f64,
    /// Magnetic pull for regular buttons.
    pub magnetic_damp: f64,
    /// Magnetic pull for `.primary` buttons.
    pub magnetic_primary_damp: f64,
    /// Throttle window for pointer moves.
    pub pointer_throttle_ms: u32,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            parallax_delay_ms: 1000,
            approach: 0.08,
            depth_step: 0.015,
            magnetic_damp: 0.1,
            magnetic_primary_damp: 0.12,
            pointer_throttle_ms: 16,
        }
    }
}

/// Cases carousel settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Gap between cards.
    pub gap_px: f64,
    /// Card width used when no card can be measured.
    pub fallback_card_px: f64,
    /// Re-entrancy guard after each programmatic advance.
    pub guard_ms: u32,
    /// Auto-advance period.
    pub interval_ms: u32,
    /// Delay before auto-advance resumes after a touch ends.
    pub resume_after_touch_ms: u32,
    /// Distance from the end treated as "at the end".
    pub end_tolerance_px: f64,
    /// Amplification applied to touch drags.
    pub drag_factor: f64,
    /// Throttle window for progress updates.
    pub progress_throttle_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap_px: 14.0,
            fallback_card_px: 340.0,
            guard_ms: 300,
            interval_ms: 4000,
            resume_after_touch_ms: 3000,
            end_tolerance_px: 10.0,
            drag_factor: 2.0,
            progress_throttle_ms: 50,
        }
    }
}

/// Inner padding of the chart drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Padding {
    /// Left padding.
    pub left: f64,
    /// Right padding.
    pub right: f64,
    /// Top padding.
    pub top: f64,
    /// Bottom padding.
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 18.0,
            right: 16.0,
            top: 18.0,
            bottom: 30.0,
        }
    }
}

/// Growth chart settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Drawing width used when the SVG has no viewBox.
    pub fallback_width: f64,
    /// Drawing height used when the SVG has no viewBox.
    pub fallback_height: f64,
    /// Inner padding.
    pub padding: Padding,
    /// Delay before the chart is wired.
    pub delay_ms: u32,
    /// Delay on low-performance devices.
    pub delay_low_perf_ms: u32,
    /// Divisor applied to the frame timestamp for the idle sine sweep.
    pub idle_period_ms: f64,
    /// KPI tween duration.
    pub kpi_ms: u32,
    /// KPI tween duration on mobile.
    pub kpi_mobile_ms: u32,
    /// Line draw-in duration.
    pub draw_ms: u32,
    /// Line draw-in duration on mobile.
    pub draw_mobile_ms: u32,
    /// Area fade delay.
    pub area_delay_ms: u32,
    /// Area fade delay on mobile.
    pub area_delay_mobile_ms: u32,
    /// Throttle window for pointer moves.
    pub pointer_throttle_ms: u32,
    /// Throttle window for pointer moves on low-performance devices.
    pub pointer_throttle_low_perf_ms: u32,
    /// Throttle window for touch moves.
    pub touch_throttle_ms: u32,
    /// Minimum gap between index updates on mobile.
    pub mobile_move_gate_ms: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            fallback_width: 720.0,
            fallback_height: 260.0,
            padding: Padding::default(),
            delay_ms: 800,
            delay_low_perf_ms: 1500,
            idle_period_ms: 900.0,
            kpi_ms: 420,
            kpi_mobile_ms: 300,
            draw_ms: 900,
            draw_mobile_ms: 600,
            area_delay_ms: 120,
            area_delay_mobile_ms: 80,
            pointer_throttle_ms: 16,
            pointer_throttle_low_perf_ms: 100,
            touch_throttle_ms: 100,
            mobile_move_gate_ms: 50,
        }
    }
}

/// Logo marquee settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Delay before the marquee is built.
    pub delay_ms: u32,
    /// Gap between logo pills.
    pub gap_px: f64,
    /// Pill width used when the first pill cannot be measured.
    pub fallback_item_px: f64,
    /// Scroll speed in pixels per second.
    pub speed_px_s: f64,
    /// Scroll speed on low-performance devices.
    pub speed_low_perf_px_s: f64,
    /// Lower bound on the loop duration.
    pub min_duration_s: f64,
    /// Debounce for re-initialising on resize.
    pub resize_debounce_ms: u32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            gap_px: 10.0,
            fallback_item_px: 200.0,
            speed_px_s: 30.0,
            speed_low_perf_px_s: 20.0,
            min_duration_s: 30.0,
            resize_debounce_ms: 250,
        }
    }
}

/// Document-level boot markers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Delay before `content-loaded` is added to the root element.
    pub content_loaded_ms: u32,
    /// Delay after `load` before `enhanced` is added on capable devices.
    pub enhanced_after_load_ms: u32,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            content_loaded_ms: 100,
            enhanced_after_load_ms: 500,
        }
    }
}

impl LandingConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] when a value fails validation.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration from an optional embedded payload.
    ///
    /// A missing or blank payload yields the defaults. An invalid payload is
    /// logged and also yields the defaults so the page keeps working.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, detail = ?err, "ignoring landing configuration");
                Self::default()
            }
        }
    }

    /// Check cross-field and range constraints.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::invalid("theme", "storage_key", "empty"));
        }
        let preloader = &self.preloader;
        if preloader.min_ms > preloader.max_ms {
            return Err(ConfigError::invalid("preloader", "min_ms", "exceeds_max"));
        }
        if preloader.min_low_perf_ms > preloader.max_low_perf_ms {
            return Err(ConfigError::invalid(
                "preloader",
                "min_low_perf_ms",
                "exceeds_max",
            ));
        }
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "carousel",
                "interval_ms",
                "must_be_positive",
            ));
        }
        if self.carousel.fallback_card_px <= 0.0 {
            return Err(ConfigError::invalid(
                "carousel",
                "fallback_card_px",
                "must_be_positive",
            ));
        }
        if self.carousel.gap_px < 0.0 {
            return Err(ConfigError::invalid("carousel", "gap_px", "negative"));
        }
        let chart = &self.chart;
        let pad = chart.padding;
        if chart.fallback_width - pad.left - pad.right <= 0.0
            || chart.fallback_height - pad.top - pad.bottom <= 0.0
        {
            return Err(ConfigError::invalid("chart", "padding", "no_inner_area"));
        }
        if chart.idle_period_ms <= 0.0 {
            return Err(ConfigError::invalid(
                "chart",
                "idle_period_ms",
                "must_be_positive",
            ));
        }
        if chart.kpi_ms == 0 || chart.kpi_mobile_ms == 0 {
            return Err(ConfigError::invalid("chart", "kpi_ms", "must_be_positive"));
        }
        if self.marquee.speed_px_s <= 0.0 || self.marquee.speed_low_perf_px_s <= 0.0 {
            return Err(ConfigError::invalid(
                "marquee",
                "speed_px_s",
                "must_be_positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold)
            || !(0.0..=1.0).contains(&self.reveal.threshold_low_perf)
        {
            return Err(ConfigError::invalid("reveal", "threshold", "out_of_range"));
        }
        Ok(())
    }
}
