//! Reading-progress bar and header tone.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::utils::window;
use web_sys::{Element, HtmlElement};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;
use crate::core::scroll::{Throttle, header_scrolled, page_progress, percent_width};

struct ScrollProgress {
    bar: Option<HtmlElement>,
    header: Option<Element>,
    threshold: f64,
    throttle: Throttle,
}

impl ScrollProgress {
    fn update(&mut self, now_ms: f64) {
        if !self.throttle.ready(now_ms) {
            return;
        }
        let (Ok(root), Ok(body)) = (dom::root(), dom::body()) else {
            return;
        };
        let top = match root.scroll_top() {
            0 => body.scroll_top(),
            top => top,
        };
        let top = f64::from(top);
        if let Some(bar) = &self.bar {
            let fraction = page_progress(
                top,
                f64::from(root.scroll_height()),
                f64::from(root.client_height()),
            );
            dom::set_style(bar, "width", &percent_width(fraction, 2));
        }
        if let Some(header) = &self.header {
            dom::toggle_class(header, "scrolled", header_scrolled(top, self.threshold));
        }
    }
}

pub(crate) fn init(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let bar = dom::by_id::<HtmlElement>("progress").ok();
    let header = dom::by_id::<Element>("hdr").ok();
    if bar.is_none() && header.is_none() {
        return Err(DomError::MissingId("progress"));
    }
    let scroll = &config.scroll;
    let progress = Rc::new(RefCell::new(ScrollProgress {
        bar,
        header,
        threshold: scroll.header_threshold_px,
        throttle: Throttle::new(caps.tiered(scroll.throttle_low_perf_ms, scroll.throttle_ms)),
    }));

    {
        let progress = Rc::clone(&progress);
        dom::listen_passive(&window(), "scroll", caps.passive_listeners, move |_| {
            progress.borrow_mut().update(dom::now_ms());
        });
    }
    progress.borrow_mut().update(dom::now_ms());
    Ok(())
}
