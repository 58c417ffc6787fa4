//! Element lookup, class/style helpers and listener wiring shared by the controllers.

use std::any::type_name;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use gloo::utils::{document, window};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Element, Event, EventTarget, HtmlElement, NodeList, SvgElement};

/// Failure to locate or use a page element.
#[derive(Debug, Error)]
pub(crate) enum DomError {
    /// No element carries the id.
    #[error("element `#{0}` is missing")]
    MissingId(&'static str),
    /// No element matches the selector.
    #[error("no element matches `{0}`")]
    NoMatch(&'static str),
    /// The element exists but has an unexpected interface.
    #[error("`{selector}` is not a {expected}")]
    WrongType {
        /// Id or selector that was looked up.
        selector: &'static str,
        /// Expected interface.
        expected: &'static str,
    },
    /// A browser call threw.
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub(crate) type DomResult<T> = Result<T, DomError>;

/// Log a controller that could not be wired; the rest of the page continues.
pub(crate) fn report(component: &'static str, result: DomResult<()>) {
    match result {
        Ok(()) => tracing::debug!(component, "component wired"),
        Err(err) => tracing::debug!(component, error = %err, "component skipped"),
    }
}

fn cast<T: JsCast>(element: Element, selector: &'static str) -> DomResult<T> {
    element.dyn_into::<T>().map_err(|_| DomError::WrongType {
        selector,
        expected: type_name::<T>(),
    })
}

/// Element by id, cast to `T`.
pub(crate) fn by_id<T: JsCast>(id: &'static str) -> DomResult<T> {
    let element = document()
        .get_element_by_id(id)
        .ok_or(DomError::MissingId(id))?;
    cast(element, id)
}

/// First descendant of `scope` matching `selector`, cast to `T`.
pub(crate) fn query_in<T: JsCast>(scope: &Element, selector: &'static str) -> DomResult<T> {
    let element = scope
        .query_selector(selector)?
        .ok_or(DomError::NoMatch(selector))?;
    cast(element, selector)
}

/// First element in the document matching `selector`.
pub(crate) fn query<T: JsCast>(selector: &'static str) -> DomResult<T> {
    let element = document()
        .query_selector(selector)?
        .ok_or(DomError::NoMatch(selector))?;
    cast(element, selector)
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`.
pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    document()
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// Every descendant of `scope` matching `selector`.
pub(crate) fn query_all_in(scope: &Element, selector: &str) -> Vec<Element> {
    scope
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// The `<html>` element.
pub(crate) fn root() -> DomResult<Element> {
    document()
        .document_element()
        .ok_or(DomError::NoMatch("html"))
}

/// The `<body>` element.
pub(crate) fn body() -> DomResult<HtmlElement> {
    document().body().ok_or(DomError::NoMatch("body"))
}

/// Elements carrying an inline style declaration.
pub(crate) trait Styled {
    fn inline_style(&self) -> CssStyleDeclaration;
}

impl Styled for HtmlElement {
    fn inline_style(&self) -> CssStyleDeclaration {
        self.style()
    }
}

impl Styled for SvgElement {
    fn inline_style(&self) -> CssStyleDeclaration {
        self.style()
    }
}

/// Set one inline style property.
pub(crate) fn set_style(element: &impl Styled, property: &str, value: &str) {
    if let Err(err) = element.inline_style().set_property(property, value) {
        tracing::debug!(property, error = ?err, "style update rejected");
    }
}

/// Set an attribute, logging rejections.
pub(crate) fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        tracing::debug!(name, error = ?err, "attribute update rejected");
    }
}

/// Add or remove `class` depending on `on`.
pub(crate) fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::debug!(class, error = ?err, "class update rejected");
    }
}

pub(crate) fn add_class(element: &Element, class: &str) {
    toggle_class(element, class, true);
}

pub(crate) fn remove_class(element: &Element, class: &str) {
    toggle_class(element, class, false);
}

pub(crate) fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Evaluate a media query; `None` when `matchMedia` is unavailable.
pub(crate) fn media_matches(query: &str) -> Option<bool> {
    window()
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
}

/// Wall-clock milliseconds used for throttles and guards.
pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Page-lifetime listener.
pub(crate) fn listen<F>(target: &EventTarget, event: &'static str, callback: F)
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new(target, event, callback).forget();
}

/// Page-lifetime listener that may call `preventDefault`.
pub(crate) fn listen_active<F>(target: &EventTarget, event: &'static str, callback: F)
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
    .forget();
}

/// Page-lifetime scroll/move listener: passive when the browser supports it.
pub(crate) fn listen_passive<F>(target: &EventTarget, event: &'static str, passive: bool, callback: F)
where
    F: FnMut(&Event) + 'static,
{
    let options = if passive {
        EventListenerOptions::default()
    } else {
        EventListenerOptions::enable_prevent_default()
    };
    EventListener::new_with_options(target, event, options, callback).forget();
}

/// Fire-and-forget timer.
pub(crate) fn after<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    Timeout::new(millis, callback).forget();
}
