//! One-shot `show` classes for `.reveal` blocks entering the viewport.

use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::reveal::RevealPlan;

pub(crate) fn init(plan: &RevealPlan) -> DomResult<()> {
    let targets = dom::query_all(".reveal");
    if targets.is_empty() {
        return Err(DomError::NoMatch(".reveal"));
    }
    if plan.show_all_immediately {
        for target in &targets {
            dom::add_class(target, "show");
        }
        return Ok(());
    }

    let unobserve = plan.unobserve_after_show;
    let on_change = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::add_class(&target, "show");
                if unobserve {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(plan.threshold));
    options.set_root_margin(&plan.root_margin);
    let observer =
        IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &options)?;
    on_change.forget();
    for target in &targets {
        observer.observe(target);
    }
    tracing::debug!(count = targets.len(), threshold = plan.threshold, "reveal observing");
    Ok(())
}
