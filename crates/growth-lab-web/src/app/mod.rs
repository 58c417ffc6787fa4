//! Browser entry point: probes the device, resolves configuration and wires
//! every page controller.

mod carousel;
mod chart;
mod clipboard;
mod decor;
mod dom;
mod expand;
mod marquee;
mod modal;
mod nav;
mod preferences;
mod preloader;
mod probe;
mod reveal;
mod scroll;
mod theme;

use std::rc::Rc;

use anyhow::Context;
use gloo::utils::window;
use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::core::capability::Capabilities;
use crate::core::config::{CONFIG_ELEMENT_ID, LandingConfig};
use crate::core::reveal::RevealPlan;

/// Install logging and wire the landing page.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new().set_max_level(level).build(),
    );
    if let Err(err) = boot() {
        tracing::error!(error = %err, detail = ?err, "landing page boot failed");
    }
}

fn embedded_config() -> Option<String> {
    dom::by_id::<Element>(CONFIG_ELEMENT_ID)
        .ok()
        .and_then(|script| script.text_content())
}

fn boot() -> anyhow::Result<()> {
    let root = dom::root().context("document has no root element")?;
    dom::add_class(&root, "has-js");

    let config = Rc::new(LandingConfig::resolve(embedded_config().as_deref()));
    let caps = Capabilities::from_probe(&probe::probe());
    tracing::info!(
        low_performance = caps.low_performance,
        reduced_motion = caps.reduced_motion,
        mobile = caps.mobile,
        "landing page booting"
    );

    dom::report("preloader", preloader::init(&caps, &config));
    dom::report("theme", theme::init(&config));
    dom::report("scroll", scroll::init(&caps, &config));
    dom::report("nav", nav::init());
    dom::report("modal", modal::init(&caps, &config));
    dom::report("clipboard", clipboard::init(&config));
    dom::report("magnetic", decor::init_magnetic(&caps, &config));
    dom::report("carousel", carousel::init(&caps, &config));
    dom::report("expand", expand::init(&caps));

    schedule_deferred(caps, &config);
    mark_document(&root, caps, &config);
    Ok(())
}

/// Controllers that start after the first paint.
fn schedule_deferred(caps: Capabilities, config: &Rc<LandingConfig>) {
    let plan = RevealPlan::for_device(&caps, config);
    dom::after(plan.delay_ms, move || dom::report("reveal", reveal::init(&plan)));

    if !caps.mobile {
        let config = Rc::clone(config);
        dom::after(config.decor.parallax_delay_ms, move || {
            dom::report("parallax", decor::init_parallax(&caps, &config));
        });
    }

    {
        let config = Rc::clone(config);
        let delay = caps.tiered(config.chart.delay_low_perf_ms, config.chart.delay_ms);
        dom::after(delay, move || {
            dom::report("chart", chart::init(&caps, &config));
        });
    }

    let config = Rc::clone(config);
    dom::after(config.marquee.delay_ms, move || {
        dom::report("marquee", marquee::init(&caps, &config));
    });
}

fn mark_document(root: &Element, caps: Capabilities, config: &LandingConfig) {
    if let Ok(year) = dom::by_id::<Element>("year") {
        year.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    }

    let loaded = root.clone();
    dom::after(config.boot.content_loaded_ms, move || {
        dom::add_class(&loaded, "content-loaded");
    });

    if caps.low_performance {
        return;
    }
    if let Some(html) = root.dyn_ref::<HtmlElement>() {
        dom::set_style(html, "scroll-behavior", "smooth");
    }
    let enhanced = root.clone();
    let delay = config.boot.enhanced_after_load_ms;
    dom::listen(&window(), "load", move |_| {
        let enhanced = enhanced.clone();
        dom::after(delay, move || dom::add_class(&enhanced, "enhanced"));
    });
}
