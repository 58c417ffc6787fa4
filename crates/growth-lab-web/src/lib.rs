#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Growth Lab landing page interactivity.
//!
//! DOM-free models live under [`core`] and are tested natively; the browser
//! controllers that bind them to the page markup are compiled for wasm32 only.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::core::capability::{Capabilities, DeviceProbe};
    use crate::core::chart::{ChartData, SeriesKey};
    use crate::core::config::LandingConfig;

    #[test]
    fn default_config_is_valid_for_every_device_tier() {
        let config = LandingConfig::default();
        assert!(config.validate().is_ok());
        let slow = Capabilities::from_probe(&DeviceProbe {
            hardware_concurrency: Some(2.0),
            ..DeviceProbe::default()
        });
        assert!(slow.low_performance);
        assert!(slow.preloader_min_ms(&config) < slow.preloader_max_ms(&config));
    }

    #[test]
    fn chart_data_ships_revenue_first() {
        let data = ChartData::default();
        assert_eq!(data.default_key(), SeriesKey::Revenue);
        assert_eq!(data.series(SeriesKey::Roi).values.len(), data.labels.len());
    }
}
