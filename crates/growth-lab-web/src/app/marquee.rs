//! Seamless logo strip: clones every pill once and loops a CSS animation.

use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;
use crate::core::marquee::{CLONE_MARKER, MarqueePlan};

const TRACK: &str = ".marquee-track";

struct Marquee {
    track: HtmlElement,
    caps: Capabilities,
    config: Rc<LandingConfig>,
    hover_bound: Cell<bool>,
}

impl Marquee {
    fn refresh(&self) -> DomResult<()> {
        let originals = dom::query_all_in(&self.track, &format!(".logo-pill:not([{CLONE_MARKER}])"));
        if originals.is_empty() {
            return Err(DomError::NoMatch(".logo-pill"));
        }
        let clones = dom::query_all_in(&self.track, &format!(".logo-pill[{CLONE_MARKER}]"));
        let width = originals
            .first()
            .and_then(|pill| pill.dyn_ref::<HtmlElement>())
            .map(|pill| f64::from(pill.offset_width()));
        let plan = MarqueePlan::new(originals.len(), clones.len(), width, &self.caps, &self.config);

        for clone in &clones {
            clone.remove();
        }
        for pill in originals.iter().take(plan.clone_count) {
            let copy = pill.clone_node_with_deep(true)?;
            if let Some(copy) = copy.dyn_ref::<Element>() {
                dom::set_attr(copy, "aria-hidden", "true");
                dom::set_attr(copy, CLONE_MARKER, "");
            }
            self.track.append_child(&copy)?;
        }
        if let Some(animation) = &plan.animation {
            dom::set_style(&self.track, "animation", animation);
        }
        if plan.pause_on_hover && !self.hover_bound.replace(true) {
            for (event, state) in [("mouseenter", "paused"), ("mouseleave", "running")] {
                let track = self.track.clone();
                dom::listen(&self.track, event, move |_| {
                    dom::set_style(&track, "animation-play-state", state);
                });
            }
        }
        tracing::debug!(
            originals = originals.len(),
            removed = plan.remove_clones,
            cloned = plan.clone_count,
            "marquee refreshed"
        );
        Ok(())
    }
}

fn set_play_state(state: &str) {
    for track in dom::query_all(TRACK) {
        if let Some(track) = track.dyn_ref::<HtmlElement>() {
            dom::set_style(track, "animation-play-state", state);
        }
    }
}

/// Build the strip and keep it in sync with resizes and tab visibility.
pub(crate) fn init(caps: &Capabilities, config: &Rc<LandingConfig>) -> DomResult<()> {
    let marquee = Rc::new(Marquee {
        track: dom::query::<HtmlElement>(TRACK)?,
        caps: *caps,
        config: Rc::clone(config),
        hover_bound: Cell::new(false),
    });
    marquee.refresh()?;

    let mut pending: Option<Timeout> = None;
    let debounce_ms = config.marquee.resize_debounce_ms;
    {
        let marquee = Rc::clone(&marquee);
        dom::listen(&window(), "resize", move |_| {
            let marquee = Rc::clone(&marquee);
            let timer = Timeout::new(debounce_ms, move || {
                if let Err(err) = marquee.refresh() {
                    tracing::debug!(error = %err, "marquee refresh skipped");
                }
            });
            pending.replace(timer);
        });
    }
    dom::listen(&document(), "visibilitychange", |_| {
        set_play_state(if document().hidden() { "paused" } else { "running" });
    });
    Ok(())
}
