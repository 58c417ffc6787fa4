//! Splash screen: waits for the minimum time and critical assets, then fades out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{DocumentReadyState, Element, HtmlElement, HtmlImageElement};

use crate::app::dom::{self, DomResult};
use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;
use crate::core::preloader::{EndReason, PreloaderGate, PreloaderTimings};

const PRELOADER_ID: &str = "site-preloader";
const CRITICAL_IMAGES: &str = r#"img[data-preload="1"]"#;

struct Splash {
    node: HtmlElement,
    bar: Option<HtmlElement>,
    root: Element,
    timings: PreloaderTimings,
    gate: RefCell<PreloaderGate>,
}

impl Splash {
    fn settle(&self, outcome: Option<EndReason>) {
        let Some(reason) = outcome else {
            return;
        };
        tracing::debug!(?reason, "preloader ending");
        if let Some(bar) = &self.bar {
            dom::set_style(bar, "transform", "scaleX(1)");
            dom::set_style(bar, "animation", "none");
        }
        let node = self.node.clone();
        let root = self.root.clone();
        let removal_ms = self.timings.removal_ms;
        dom::after(self.timings.fade_delay_ms, move || {
            dom::add_class(&node, "is-done");
            dom::remove_class(&root, "is-loading");
            dom::after(removal_ms, move || node.remove());
        });
    }
}

/// Counts outstanding readiness signals and fires once when none remain.
struct Countdown {
    remaining: Cell<usize>,
    done: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Countdown {
    fn new(total: usize, done: impl FnOnce() + 'static) -> Rc<Self> {
        let countdown = Rc::new(Self {
            remaining: Cell::new(total),
            done: RefCell::new(Some(Box::new(done))),
        });
        if total == 0 {
            countdown.fire();
        }
        countdown
    }

    fn arrive(&self) {
        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        if left == 0 {
            self.fire();
        }
    }

    fn fire(&self) {
        let done = self.done.borrow_mut().take();
        if let Some(done) = done {
            done();
        }
    }
}

/// Start the splash timers, or drop `is-loading` at once when there is no splash.
pub(crate) fn init(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let root = dom::root()?;
    let Ok(node) = dom::by_id::<HtmlElement>(PRELOADER_ID) else {
        dom::remove_class(&root, "is-loading");
        return Ok(());
    };
    let timings = PreloaderTimings::for_device(caps, config);
    let splash = Rc::new(Splash {
        bar: dom::query_in::<HtmlElement>(&node, ".spl-bar-fill").ok(),
        node,
        root,
        timings,
        gate: RefCell::new(PreloaderGate::new()),
    });

    {
        let splash = Rc::clone(&splash);
        dom::after(timings.min_ms, move || {
            let outcome = splash.gate.borrow_mut().min_time_elapsed();
            splash.settle(outcome);
        });
    }
    {
        let splash = Rc::clone(&splash);
        dom::after(timings.max_ms, move || {
            let outcome = splash.gate.borrow_mut().force();
            splash.settle(outcome);
        });
    }

    let ready = {
        let splash = Rc::clone(&splash);
        move || {
            let outcome = splash.gate.borrow_mut().resources_ready();
            splash.settle(outcome);
        }
    };
    wait_for_resources(caps, timings, ready);
    Ok(())
}

fn wait_for_resources(caps: &Capabilities, timings: PreloaderTimings, ready: impl FnOnce() + 'static) {
    let images: Vec<HtmlImageElement> = if timings.await_assets {
        dom::query_all(CRITICAL_IMAGES)
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlImageElement>().ok())
            .filter(|img| !(img.complete() && img.natural_width() > 0))
            .collect()
    } else {
        Vec::new()
    };
    let fonts = timings
        .await_assets
        .then(|| document().fonts().ready().ok())
        .flatten();

    let total = 1 + usize::from(fonts.is_some()) + images.len();
    let countdown = Countdown::new(total, ready);

    {
        let countdown = Rc::clone(&countdown);
        dom::after(timings.resources_cap_ms, move || countdown.fire());
    }

    let already_loaded =
        caps.low_performance && document().ready_state() == DocumentReadyState::Complete;
    if already_loaded {
        countdown.arrive();
    } else {
        let countdown = Rc::clone(&countdown);
        EventListener::once(&window(), "load", move |_| countdown.arrive()).forget();
    }

    if let Some(promise) = fonts {
        let countdown = Rc::clone(&countdown);
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                tracing::debug!(error = ?err, "font loading rejected");
            }
            countdown.arrive();
        });
    }

    for img in images {
        let settled = Rc::new(Cell::new(false));
        for event in ["load", "error"] {
            let countdown = Rc::clone(&countdown);
            let settled = Rc::clone(&settled);
            EventListener::once(&img, event, move |_| {
                if !settled.replace(true) {
                    countdown.arrive();
                }
            })
            .forget();
        }
    }
}
