//! Benefit accordions and service "more" links.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::capability::Capabilities;
use crate::core::disclosure::{Disclosure, PanelView, ServiceToggle, service_toggle};

/// Collapse delay after the pointer leaves a benefit header, and the
/// removal delay of a collapsed service block.
const COLLAPSE_MS: u32 = 300;
/// Delay before a freshly inserted service block is measured and opened.
const OPEN_SERVICE_MS: u32 = 10;

struct Benefit {
    block: Element,
    details: HtmlElement,
    icon: Option<Element>,
    state: Disclosure,
    pending: Option<Timeout>,
}

impl Benefit {
    fn render(&self) {
        let view = PanelView::new(self.state.expanded(), self.details.scroll_height());
        dom::toggle_class(&self.block, "expanded", view.expanded);
        dom::set_style(&self.details, "max-height", &view.max_height);
        if let Some(icon) = &self.icon {
            icon.set_text_content(Some(view.icon));
        }
    }
}

fn bind_benefit(block: Element, mobile: bool) -> DomResult<()> {
    let header = dom::query_in::<Element>(&block, ".benefit-header")?;
    let details = dom::query_in::<HtmlElement>(&block, ".benefit-details")?;
    let benefit = Rc::new(RefCell::new(Benefit {
        icon: dom::query_in::<Element>(&block, ".expand-icon").ok(),
        state: Disclosure::default(),
        pending: None,
        block,
        details,
    }));

    if mobile {
        dom::listen(&header, "click", move |_| {
            let mut benefit = benefit.borrow_mut();
            benefit.state.toggle();
            benefit.render();
        });
        return Ok(());
    }

    {
        let benefit = Rc::clone(&benefit);
        dom::listen(&header, "mouseenter", move |_| {
            let mut benefit = benefit.borrow_mut();
            benefit.pending = None;
            if benefit.state.hover_enter() {
                benefit.render();
            }
        });
    }
    dom::listen(&header, "mouseleave", move |_| {
        benefit.borrow_mut().state.hover_leave();
        let delayed = Rc::clone(&benefit);
        let timer = Timeout::new(COLLAPSE_MS, move || {
            let mut benefit = delayed.borrow_mut();
            if benefit.state.collapse_due() {
                benefit.render();
            }
        });
        benefit.borrow_mut().pending = Some(timer);
    });
    Ok(())
}

fn toggle_service(link: &Element) -> DomResult<()> {
    let service = link.closest(".svc")?.ok_or(DomError::NoMatch(".svc"))?;
    let existing = dom::query_in::<HtmlElement>(&service, ".svc-details").ok();
    match service_toggle(existing.is_some(), link.get_attribute("data-details").as_deref()) {
        ServiceToggle::Collapse { label } => {
            if let Some(details) = existing {
                dom::set_style(&details, "max-height", "0");
                dom::after(COLLAPSE_MS, move || details.remove());
            }
            link.set_text_content(Some(label));
        }
        ServiceToggle::Expand { text, label } => {
            let block = document()
                .create_element("div")?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DomError::WrongType {
                    selector: "div",
                    expected: "HtmlElement",
                })?;
            block.set_class_name("svc-details");
            let paragraph = document().create_element("p")?;
            paragraph.set_text_content(Some(&text));
            block.append_child(&paragraph)?;
            link.after_with_node_1(&block)?;
            link.set_text_content(Some(label));
            dom::after(OPEN_SERVICE_MS, move || {
                let height = format!("{}px", block.scroll_height());
                dom::set_style(&block, "max-height", &height);
            });
        }
        ServiceToggle::None => {}
    }
    Ok(())
}

pub(crate) fn init(caps: &Capabilities) -> DomResult<()> {
    let benefits = dom::query_all(".benefit.expandable");
    let services = dom::query_all(".svc .more");
    if benefits.is_empty() && services.is_empty() {
        return Err(DomError::NoMatch(".benefit.expandable"));
    }
    for block in benefits {
        if let Err(err) = bind_benefit(block, caps.mobile) {
            tracing::debug!(error = %err, "benefit block skipped");
        }
    }
    for link in services {
        let target = link.clone();
        dom::listen_active(&target, "click", move |event| {
            event.prevent_default();
            if let Err(err) = toggle_service(&link) {
                tracing::debug!(error = %err, "service details toggle failed");
            }
        });
    }
    Ok(())
}
