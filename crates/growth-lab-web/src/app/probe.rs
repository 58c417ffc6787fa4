//! Browser readings behind [`DeviceProbe`].

use std::cell::Cell;
use std::rc::Rc;

use gloo::utils::window;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, EventTarget};

use crate::app::dom;
use crate::core::capability::DeviceProbe;

const PROBE_EVENT: &str = "growth-lab-passive-probe";

/// Read every capability signal once.
pub(crate) fn probe() -> DeviceProbe {
    let window = window();
    let navigator = window.navigator();
    let cores = Some(navigator.hardware_concurrency()).filter(|cores| *cores > 0.0);
    let memory = Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|value| value.as_f64());
    DeviceProbe {
        hardware_concurrency: cores,
        device_memory_gb: memory,
        narrow_viewport: dom::media_matches("(max-width: 768px)").unwrap_or(false),
        prefers_reduced_motion: dom::media_matches("(prefers-reduced-motion: reduce)")
            .unwrap_or(false),
        coarse_pointer: dom::media_matches("(hover: none) and (pointer: coarse)").unwrap_or(false),
        fine_hover: dom::media_matches("(hover: hover) and (pointer: fine)").unwrap_or(false),
        passive_listeners: passive_listeners_supported(&window),
        intersection_observer: Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false),
    }
}

/// Register a throwaway listener whose options object records a read of `passive`.
fn passive_listeners_supported(target: &EventTarget) -> bool {
    let supported = Rc::new(Cell::new(false));
    let getter = {
        let supported = Rc::clone(&supported);
        Closure::<dyn FnMut() -> JsValue>::new(move || {
            supported.set(true);
            JsValue::FALSE
        })
    };
    let descriptor = Object::new();
    if Reflect::set(&descriptor, &JsValue::from_str("get"), getter.as_ref()).is_err() {
        return false;
    }
    let options = Object::define_property(
        &Object::new(),
        &JsValue::from_str("passive"),
        &descriptor,
    );
    let noop = Closure::<dyn FnMut()>::new(|| {});
    let listener: &Function = noop.as_ref().unchecked_ref();
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            PROBE_EVENT,
            listener,
            options.unchecked_ref::<AddEventListenerOptions>(),
        )
        .is_ok()
    {
        let _ = target.remove_event_listener_with_callback(PROBE_EVENT, listener);
    }
    supported.get()
}
