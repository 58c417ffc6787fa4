//! Cases carousel wiring over `#casesTrack`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, TouchEvent};

use crate::app::dom::{self, DomResult};
use crate::core::capability::Capabilities;
use crate::core::carousel::{Carousel, ScrollTrack};
use crate::core::config::LandingConfig;
use crate::core::scroll::{Throttle, percent_width};

/// [`ScrollTrack`] over the live track element.
struct CaseTrack {
    element: HtmlElement,
}

impl CaseTrack {
    fn options(left: f64, smooth: bool) -> ScrollToOptions {
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        options
    }
}

impl ScrollTrack for CaseTrack {
    fn scroll_left(&self) -> f64 {
        f64::from(self.element.scroll_left())
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.element.scroll_width())
    }

    fn client_width(&self) -> f64 {
        f64::from(self.element.client_width())
    }

    fn card_width(&self) -> Option<f64> {
        dom::query_in::<Element>(&self.element, ".case")
            .ok()
            .map(|card| card.get_bounding_client_rect().width())
    }

    fn scroll_by(&mut self, delta: f64, smooth: bool) {
        self.element
            .scroll_by_with_scroll_to_options(&Self::options(delta, smooth));
    }

    fn scroll_to(&mut self, left: f64, smooth: bool) {
        self.element
            .scroll_to_with_scroll_to_options(&Self::options(left, smooth));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_scroll_left(&mut self, left: f64) {
        self.element.set_scroll_left(left.round() as i32);
    }
}

struct CasesController {
    carousel: RefCell<Carousel<CaseTrack>>,
    progress: Option<HtmlElement>,
    progress_throttle: RefCell<Throttle>,
    timer: RefCell<Option<Interval>>,
    interval_ms: u32,
}

impl CasesController {
    fn render_progress(&self) {
        let Some(bar) = &self.progress else {
            return;
        };
        if !self.progress_throttle.borrow_mut().ready(dom::now_ms()) {
            return;
        }
        let fraction = self.carousel.borrow().progress();
        dom::set_style(bar, "width", &percent_width(fraction, 1));
    }

    fn start_auto(self: &Rc<Self>) {
        if !self.carousel.borrow_mut().start_auto() {
            return;
        }
        let controller = Rc::clone(self);
        let timer = Interval::new(self.interval_ms, move || {
            let step = controller.carousel.borrow_mut().auto_tick(dom::now_ms());
            tracing::trace!(?step, "carousel auto tick");
        });
        *self.timer.borrow_mut() = Some(timer);
    }

    fn stop_auto(&self) {
        if self.carousel.borrow_mut().stop_auto() {
            self.timer.borrow_mut().take();
        }
    }
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.page_x()))
}

pub(crate) fn init(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let element = dom::by_id::<HtmlElement>("casesTrack")?;
    let carousel = Carousel::new(
        CaseTrack {
            element: element.clone(),
        },
        caps,
        config,
    );
    let controller = Rc::new(CasesController {
        carousel: RefCell::new(carousel),
        progress: dom::by_id::<HtmlElement>("casesProg").ok(),
        progress_throttle: RefCell::new(Throttle::new(config.carousel.progress_throttle_ms)),
        timer: RefCell::new(None),
        interval_ms: config.carousel.interval_ms,
    });

    for (id, direction) in [("casesPrev", -1.0), ("casesNext", 1.0)] {
        let Ok(button) = dom::by_id::<Element>(id) else {
            continue;
        };
        let controller = Rc::clone(&controller);
        dom::listen(&button, "click", move |_| {
            controller
                .carousel
                .borrow_mut()
                .advance(direction, dom::now_ms());
        });
    }

    {
        let controller = Rc::clone(&controller);
        dom::listen_passive(&element, "scroll", caps.passive_listeners, move |_| {
            controller.render_progress();
        });
    }
    controller.render_progress();

    {
        let controller = Rc::clone(&controller);
        let track = element.clone();
        dom::listen_passive(&element, "touchstart", caps.passive_listeners, move |event| {
            if let Some(x) = first_touch_x(event) {
                controller
                    .carousel
                    .borrow_mut()
                    .touch_start(x, f64::from(track.offset_left()));
            }
        });
    }
    {
        let controller = Rc::clone(&controller);
        let track = element.clone();
        dom::listen_active(&element, "touchmove", move |event| {
            let Some(x) = first_touch_x(event) else {
                return;
            };
            let dragged = controller
                .carousel
                .borrow_mut()
                .touch_move(x, f64::from(track.offset_left()));
            if dragged {
                event.prevent_default();
            }
        });
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&element, "touchend", move |_| {
            controller.carousel.borrow_mut().touch_end();
        });
    }

    if caps.mobile {
        return Ok(());
    }
    if !controller.carousel.borrow().auto_enabled() {
        tracing::debug!("carousel auto-advance disabled");
    }
    controller.start_auto();

    {
        let controller = Rc::clone(&controller);
        dom::listen(&element, "mouseenter", move |_| controller.stop_auto());
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&element, "mouseleave", move |_| controller.start_auto());
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&element, "touchstart", move |_| controller.stop_auto());
    }
    {
        let resume_ms = config.carousel.resume_after_touch_ms;
        let controller = Rc::clone(&controller);
        dom::listen(&element, "touchend", move |_| {
            let controller = Rc::clone(&controller);
            dom::after(resume_ms, move || controller.start_auto());
        });
    }
    Ok(())
}
