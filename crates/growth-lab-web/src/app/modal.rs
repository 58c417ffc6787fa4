//! Modal dialogs and the simulated form submission.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::utils::{document, window};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent,
};

use crate::app::dom::{self, DomResult};
use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;
use crate::core::copy::{REQUIRED_FIELDS_ALERT, SUBMIT_ACCEPTED, SUBMIT_SENDING_HTML};
use crate::core::form::{SubmitPlan, SubmitStage, button_disabled};
use crate::core::modal::{ModalChange, ModalStack};

const FOCUSABLE: &str = r#"button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])"#;

/// Opener button id and the modal it shows.
const OPENERS: [(&str, &str); 4] = [
    ("openBrief", "briefModal"),
    ("heroCta", "briefModal"),
    ("openBriefMobile", "briefModal"),
    ("openCallback", "callbackModal"),
];

const FORMS: [&str; 2] = ["briefForm", "callbackForm"];

#[derive(Default)]
struct ModalController {
    stack: ModalStack,
}

impl ModalController {
    fn open(&mut self, id: &str) {
        let Some(modal) = document().get_element_by_id(id) else {
            return;
        };
        for change in self.stack.open(id) {
            match change {
                ModalChange::Close(previous) => {
                    if let Some(previous) = document().get_element_by_id(&previous) {
                        hide(&previous);
                    }
                }
                ModalChange::Open(_) => show(&modal),
            }
        }
    }

    fn close(&mut self, modal: &Element) {
        self.stack.close(&modal.id());
        hide(modal);
    }

    fn close_active(&mut self) {
        if let Some(ModalChange::Close(id)) = self.stack.close_active() {
            if let Some(modal) = document().get_element_by_id(&id) {
                hide(&modal);
            }
        }
    }
}

fn show(modal: &Element) {
    dom::add_class(modal, "open");
    dom::set_attr(modal, "aria-hidden", "false");
    if let Ok(body) = dom::body() {
        dom::add_class(&body, "modal-open");
    }
    if let Ok(target) = dom::query_in::<HtmlElement>(modal, FOCUSABLE) {
        if let Err(err) = target.focus() {
            tracing::debug!(error = ?err, "modal focus rejected");
        }
    }
}

fn hide(modal: &Element) {
    dom::remove_class(modal, "open");
    dom::set_attr(modal, "aria-hidden", "true");
    if let Ok(body) = dom::body() {
        dom::remove_class(&body, "modal-open");
    }
}

/// Bind openers, close buttons, backdrop clicks, Escape, page hide and both forms.
pub(crate) fn init(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let controller = Rc::new(RefCell::new(ModalController::default()));

    for (opener, target) in OPENERS {
        let Ok(button) = dom::by_id::<Element>(opener) else {
            continue;
        };
        let controller = Rc::clone(&controller);
        dom::listen(&button, "click", move |_| controller.borrow_mut().open(target));
    }

    for modal in dom::query_all(".modal") {
        {
            let controller = Rc::clone(&controller);
            let backdrop = modal.clone();
            dom::listen(&modal, "click", move |event| {
                let on_backdrop = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .is_some_and(|target| target == backdrop);
                if on_backdrop {
                    controller.borrow_mut().close(&backdrop);
                }
            });
        }
        for close in dom::query_all_in(&modal, ".x") {
            let controller = Rc::clone(&controller);
            let modal = modal.clone();
            dom::listen(&close, "click", move |_| controller.borrow_mut().close(&modal));
        }
    }

    {
        let controller = Rc::clone(&controller);
        dom::listen(&document(), "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if escape {
                controller.borrow_mut().close_active();
            }
        });
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&window(), "pagehide", move |_| {
            controller.borrow_mut().close_active();
            for modal in dom::query_all(".modal.open") {
                dom::remove_class(&modal, "open");
            }
            if let Ok(body) = dom::body() {
                dom::remove_class(&body, "modal-open");
            }
        });
    }

    let plan = SubmitPlan::for_device(caps, config);
    for id in FORMS {
        if let Ok(form) = dom::by_id::<HtmlFormElement>(id) {
            bind_form(form, plan, Rc::clone(&controller));
        }
    }
    Ok(())
}

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Mark blank required fields; returns the timeline to run when the form may
/// be submitted.
fn check_required(form: &HtmlFormElement, plan: SubmitPlan) -> Option<SubmitPlan> {
    let fields = dom::query_all_in(form, "[required]");
    let values: Vec<String> = fields.iter().map(field_value).collect();
    match plan.admit(values.iter().map(String::as_str)) {
        Ok(plan) => {
            for field in &fields {
                dom::remove_class(field, "error");
            }
            Some(plan)
        }
        Err(missing) => {
            for (idx, field) in fields.iter().enumerate() {
                dom::toggle_class(field, "error", missing.indices.contains(&idx));
            }
            tracing::debug!(form = %form.id(), blank = missing.indices.len(), "form rejected");
            gloo::dialogs::alert(REQUIRED_FIELDS_ALERT);
            None
        }
    }
}

fn bind_form(form: HtmlFormElement, plan: SubmitPlan, modals: Rc<RefCell<ModalController>>) {
    let target = form.clone();
    dom::listen_active(&target, "submit", move |event| {
        event.prevent_default();
        let Some(plan) = check_required(&form, plan) else {
            return;
        };
        let Ok(button) = dom::query_in::<HtmlButtonElement>(&form, r#"button[type="submit"]"#)
        else {
            return;
        };
        spawn_local(run_submission(form.clone(), button, plan, Rc::clone(&modals)));
    });
}

async fn run_submission(
    form: HtmlFormElement,
    button: HtmlButtonElement,
    plan: SubmitPlan,
    modals: Rc<RefCell<ModalController>>,
) {
    let original = button.inner_html();
    for step in plan.steps {
        if step.after_ms > 0 {
            TimeoutFuture::new(step.after_ms).await;
        }
        match step.stage {
            SubmitStage::Sending => button.set_inner_html(SUBMIT_SENDING_HTML),
            SubmitStage::Accepted => button.set_text_content(Some(SUBMIT_ACCEPTED)),
            SubmitStage::Closed => {
                if let Ok(Some(modal)) = form.closest(".modal") {
                    modals.borrow_mut().close(&modal);
                }
            }
            SubmitStage::Reset => {
                button.set_inner_html(&original);
                form.reset();
            }
        }
        button.set_disabled(button_disabled(step.stage));
    }
    tracing::debug!(form = %form.id(), "submission finished");
}
