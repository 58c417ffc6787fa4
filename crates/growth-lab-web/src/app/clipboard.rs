//! Copy-e-mail button.

use gloo::utils::{document, window};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlButtonElement, HtmlDocument, HtmlElement, HtmlTextAreaElement};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::clipboard::with_scratch;
use crate::core::config::LandingConfig;
use crate::core::copy::{COPY_DONE_HTML, COPY_FALLBACK_DONE};

pub(crate) fn init(config: &LandingConfig) -> DomResult<()> {
    let button = dom::by_id::<HtmlButtonElement>("copyEmail")?;
    let feedback_ms = config.clipboard.feedback_ms;
    let target = button.clone();
    dom::listen(&target, "click", move |_| {
        let email = dom::by_id::<HtmlElement>("emailVal")
            .ok()
            .and_then(|node| node.text_content())
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        let navigator = window().navigator();
        let has_clipboard =
            Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
        if email.is_empty() || !has_clipboard {
            return;
        }
        let button = button.clone();
        spawn_local(async move {
            let written = JsFuture::from(navigator.clipboard().write_text(&email)).await;
            match written {
                Ok(_) => confirm(&button, feedback_ms),
                Err(err) => {
                    tracing::debug!(error = ?err, "clipboard write rejected, using selection copy");
                    legacy_copy(&email);
                    confirm_fallback(&button, feedback_ms);
                }
            }
        });
    });
    Ok(())
}

fn confirm(button: &HtmlButtonElement, feedback_ms: u32) {
    let original = button.inner_html();
    button.set_inner_html(COPY_DONE_HTML);
    button.set_disabled(true);
    let button = button.clone();
    dom::after(feedback_ms, move || {
        button.set_inner_html(&original);
        button.set_disabled(false);
    });
}

fn confirm_fallback(button: &HtmlButtonElement, feedback_ms: u32) {
    let original = button.text_content();
    button.set_text_content(Some(COPY_FALLBACK_DONE));
    let button = button.clone();
    dom::after(feedback_ms, move || button.set_text_content(original.as_deref()));
}

/// Temporary `<textarea>` plus `execCommand("copy")`; failures are only logged.
fn legacy_copy(text: &str) {
    match selection_copy(text) {
        Ok(copied) => tracing::debug!(?copied, "selection copy attempted"),
        Err(err) => tracing::debug!(error = %err, "selection copy failed"),
    }
}

fn selection_copy(text: &str) -> DomResult<Option<bool>> {
    let document = document();
    let body = dom::body()?;
    let area = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| DomError::WrongType {
            selector: "textarea",
            expected: "HtmlTextAreaElement",
        })?;
    area.set_value(text);
    body.append_child(&area)?;
    area.select();
    with_scratch(
        area,
        |_| {
            document
                .dyn_ref::<HtmlDocument>()
                .map(|html| html.exec_command("copy"))
                .transpose()
                .map_err(DomError::from)
        },
        |area| body.remove_child(&area).map(|_| ()).map_err(DomError::from),
    )
}
