use growth_lab_web::core::capability::{Capabilities, DeviceProbe};
use growth_lab_web::core::carousel::{AutoStep, Carousel, ScrollTrack};
use growth_lab_web::core::chart::{ChartData, ChartGeometry, ChartModel, SeriesKey};
use growth_lab_web::core::config::LandingConfig;
use growth_lab_web::core::error::{ConfigError, StorageError};
use growth_lab_web::core::form::{SubmitPlan, SubmitStage, button_disabled, validate_required};
use growth_lab_web::core::marquee::MarqueePlan;
use growth_lab_web::core::modal::{ModalChange, ModalStack};
use growth_lab_web::core::preloader::{EndReason, PreloaderGate};
use growth_lab_web::core::theme::{ThemeMode, ThemePreference, ThemeStore};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Saved {
    value: Option<String>,
    writes: usize,
}

#[derive(Clone, Debug, Default)]
struct MemoryStore(Rc<RefCell<Saved>>);

impl ThemeStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        let mut saved = self.0.borrow_mut();
        saved.value = Some(value.to_string());
        saved.writes += 1;
        Ok(())
    }
}

#[derive(Debug)]
struct Track {
    left: f64,
    scroll_width: f64,
    client_width: f64,
}

impl ScrollTrack for Track {
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
        Some(300.0)
    }

    fn scroll_by(&mut self, delta: f64, _smooth: bool) {
        let max = (self.scroll_width - self.client_width).max(0.0);
        self.left = (self.left + delta).clamp(0.0, max);
    }

    fn scroll_to(&mut self, left: f64, _smooth: bool) {
        self.left = left;
    }

    fn set_scroll_left(&mut self, left: f64) {
        self.left = left;
    }
}

fn desktop() -> Capabilities {
    Capabilities::from_probe(&DeviceProbe {
        hardware_concurrency: Some(8.0),
        device_memory_gb: Some(8.0),
        fine_hover: true,
        passive_listeners: true,
        intersection_observer: true,
        ..DeviceProbe::default()
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn theme_round_trips_through_store() -> anyhow::Result<()> {
    let store = MemoryStore::default();
    let mut preference = ThemePreference::new(store.clone(), Some(true));
    assert_eq!(preference.current(), ThemeMode::Dark);
    assert_eq!(store.0.borrow().writes, 0);

    let toggled = preference.toggle()?;
    assert_eq!(toggled, ThemeMode::Light);
    assert_eq!(store.0.borrow().value.as_deref(), Some("light"));

    preference.toggle()?;
    assert_eq!(preference.current(), ThemeMode::Dark);
    assert_eq!(store.0.borrow().value.as_deref(), Some("dark"));
    assert_eq!(store.0.borrow().writes, 2);
    Ok(())
}

#[test]
fn chart_maps_corners_for_every_series() -> anyhow::Result<()> {
    let config = LandingConfig::default();
    let data = ChartData::default();
    let geometry = ChartGeometry::new(720.0, 260.0, config.chart.padding, data.len());
    let mut model = ChartModel::new(data, geometry);

    for key in SeriesKey::ALL {
        model.select(key);
        let g = model.geometry();
        assert!(close(g.x_at(0), 18.0));
        assert!(close(g.x_at(5), 18.0 + g.inner_width()));
        assert!(close(g.y_at(100.0), 18.0));
        assert!(close(g.y_at(0.0), 18.0 + g.inner_height()));
        assert!(model.line_path().starts_with("M 18.00 "));
        assert!(model.area_path().ends_with(" Z"));
    }
    Ok(())
}

#[test]
fn chart_pointer_session_returns_to_last_point() -> anyhow::Result<()> {
    let config = LandingConfig::default();
    let data = ChartData::default();
    let geometry = ChartGeometry::new(720.0, 260.0, config.chart.padding, data.len());
    let mut model = ChartModel::new(data, geometry);

    let centre = model.pointer_move(300.0, 0.0, 600.0);
    assert!(centre == 2 || centre == 3);
    assert!(model.engaged());
    assert_eq!(model.idle_step(0.0, config.chart.idle_period_ms), None);

    let resting = model.pointer_leave();
    assert_eq!(resting, 5);
    let highlight = model.highlight(resting);
    assert_eq!(highlight.tooltip_text, "Выручка: +92%");
    assert_eq!(model.readout(i64::from(highlight.value)), "+92%");

    assert!(model.select(SeriesKey::Leads));
    assert!(!model.select(SeriesKey::Leads));
    assert_eq!(model.highlight(resting).value, 78);
    Ok(())
}

#[test]
fn carousel_advances_then_rewinds() -> anyhow::Result<()> {
    let config = LandingConfig::default();
    let track = Track {
        left: 0.0,
        scroll_width: 1000.0,
        client_width: 400.0,
    };
    let mut carousel = Carousel::new(track, &desktop(), &config);
    assert!(carousel.auto_enabled());

    assert_eq!(carousel.auto_tick(0.0), AutoStep::Advanced);
    assert!(close(carousel.track().scroll_left(), 314.0));
    assert_eq!(carousel.auto_tick(100.0), AutoStep::Skipped);
    assert_eq!(carousel.auto_tick(4000.0), AutoStep::Advanced);
    assert!(close(carousel.track().scroll_left(), 600.0));
    assert_eq!(carousel.auto_tick(8000.0), AutoStep::Rewound);
    assert!(close(carousel.track().scroll_left(), 0.0));
    Ok(())
}

#[test]
fn modal_stack_keeps_one_open() -> anyhow::Result<()> {
    let mut stack = ModalStack::default();
    stack.open("briefModal");
    let changes = stack.open("callbackModal");
    assert_eq!(
        changes,
        vec![
            ModalChange::Close("briefModal".to_string()),
            ModalChange::Open("callbackModal".to_string()),
        ]
    );
    assert_eq!(
        stack.close_active(),
        Some(ModalChange::Close("callbackModal".to_string()))
    );
    assert_eq!(stack.close_active(), None);
    Ok(())
}

#[test]
fn submission_validates_then_follows_timeline() -> anyhow::Result<()> {
    let missing = validate_required(["Анна", "  ", ""]).err();
    assert_eq!(missing.map(|m| m.indices), Some(vec![1, 2]));
    assert!(validate_required(["Анна", "+7 900"]).is_ok());

    let plan = SubmitPlan::for_device(&desktop(), &LandingConfig::default());
    assert!(plan.admit(["Анна", " "]).is_err());
    let plan = plan
        .admit(["Анна", "+7 900"])
        .map_err(|missing| anyhow::anyhow!("blank fields {:?}", missing.indices))?;
    assert_eq!(
        plan.offsets(),
        [
            (SubmitStage::Sending, 0),
            (SubmitStage::Accepted, 1200),
            (SubmitStage::Closed, 2200),
            (SubmitStage::Reset, 2500),
        ]
    );
    let disabled: Vec<bool> = plan.steps.iter().map(|step| button_disabled(step.stage)).collect();
    assert_eq!(disabled, vec![true, true, true, false]);
    Ok(())
}

#[test]
fn marquee_reinit_is_idempotent() -> anyhow::Result<()> {
    let config = LandingConfig::default();
    let caps = desktop();
    let first = MarqueePlan::new(6, 0, Some(120.0), &caps, &config);
    assert_eq!(first.clone_count, 6);
    let again = MarqueePlan::new(6, first.clone_count, Some(120.0), &caps, &config);
    assert_eq!(again.remove_clones, 6);
    let pills = 6 + first.clone_count - again.remove_clones + again.clone_count;
    assert_eq!(pills, 12);
    Ok(())
}

#[test]
fn preloader_ends_once() -> anyhow::Result<()> {
    let mut gate = PreloaderGate::new();
    assert_eq!(gate.resources_ready(), None);
    assert_eq!(gate.min_time_elapsed(), Some(EndReason::Joined));
    assert_eq!(gate.force(), None);
    assert_eq!(gate.min_time_elapsed(), None);
    Ok(())
}

#[test]
fn json_override_changes_only_named_fields() -> anyhow::Result<()> {
    let raw = json!({
        "theme": { "storage_key": "gl-theme" },
        "chart": { "idle_period_ms": 1200.0 },
    })
    .to_string();
    let config = LandingConfig::from_json(&raw)?;
    assert_eq!(config.theme.storage_key, "gl-theme");
    assert!(close(config.chart.idle_period_ms, 1200.0));
    assert_eq!(config.carousel, LandingConfig::default().carousel);
    Ok(())
}

#[test]
fn invalid_override_falls_back_to_defaults() -> anyhow::Result<()> {
    let raw = json!({ "carousel": { "interval_ms": 0 } }).to_string();
    assert!(matches!(
        LandingConfig::from_json(&raw),
        Err(ConfigError::InvalidField {
            section: "carousel",
            field: "interval_ms",
            ..
        })
    ));
    assert_eq!(LandingConfig::resolve(Some(&raw)), LandingConfig::default());
    assert_eq!(LandingConfig::resolve(Some("   ")), LandingConfig::default());
    assert_eq!(LandingConfig::resolve(Some("{not json")), LandingConfig::default());
    Ok(())
}
