//! Decorative pointer effects: blob parallax and magnetic buttons.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::utils::window;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::app::dom::{self, DomError, DomResult};
use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;
use crate::core::motion::{Follower, magnetic_offset, parallax_offset};
use crate::core::scroll::Throttle;

fn html_elements(selector: &str) -> Vec<HtmlElement> {
    dom::query_all(selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn viewport() -> (f64, f64) {
    let window = window();
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

struct Parallax {
    blobs: Vec<HtmlElement>,
    approach: f64,
    depth_step: f64,
    follower: Cell<Follower>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl Parallax {
    fn tick(self: &Rc<Self>) {
        let mut follower = self.follower.get();
        let pointer = follower.step(self.approach);
        self.follower.set(follower);
        let view = viewport();
        for (idx, blob) in self.blobs.iter().enumerate() {
            let (x, y) = parallax_offset(idx, self.depth_step, pointer, view);
            dom::set_style(blob, "transform", &format!("translate3d({x}px, {y}px, 0)"));
        }
        let parallax = Rc::clone(self);
        let handle = request_animation_frame(move |_| parallax.tick());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn point_at(&self, x: f64, y: f64) {
        let mut follower = self.follower.get();
        follower.target = (x, y);
        self.follower.set(follower);
    }
}

/// Ease the background blobs toward the pointer.
pub(crate) fn init_parallax(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let blobs = html_elements(".blob");
    if blobs.is_empty() {
        return Err(DomError::NoMatch(".blob"));
    }
    if !caps.parallax_enabled() {
        for blob in &blobs {
            dom::set_style(blob, "transform", "none");
        }
        tracing::debug!("parallax disabled for this device");
        return Ok(());
    }

    let decor = &config.decor;
    let parallax = Rc::new(Parallax {
        blobs,
        approach: decor.approach,
        depth_step: decor.depth_step,
        follower: Cell::new(Follower::default()),
        frame: RefCell::new(None),
    });
    let mut throttle = Throttle::new(decor.pointer_throttle_ms);
    {
        let parallax = Rc::clone(&parallax);
        dom::listen_passive(&window(), "pointermove", caps.passive_listeners, move |event| {
            if !throttle.ready(dom::now_ms()) {
                return;
            }
            if let Some(pointer) = event.dyn_ref::<MouseEvent>() {
                parallax.point_at(f64::from(pointer.client_x()), f64::from(pointer.client_y()));
            }
        });
    }
    parallax.tick();
    Ok(())
}

/// Pull `.magnetic` buttons a little toward the pointer.
pub(crate) fn init_magnetic(caps: &Capabilities, config: &LandingConfig) -> DomResult<()> {
    let magnets = html_elements(".magnetic");
    if magnets.is_empty() {
        return Err(DomError::NoMatch(".magnetic"));
    }
    if !caps.magnetic_enabled() {
        tracing::debug!("magnetic buttons disabled for this device");
        return Ok(());
    }
    let decor = &config.decor;
    for magnet in magnets {
        let rect: Rc<Cell<Option<((f64, f64), (f64, f64))>>> = Rc::new(Cell::new(None));
        let damp = if dom::has_class(&magnet, "primary") {
            decor.magnetic_primary_damp
        } else {
            decor.magnetic_damp
        };
        {
            let rect = Rc::clone(&rect);
            let element = magnet.clone();
            dom::listen(&magnet, "pointerenter", move |_| {
                let bounds = element.get_bounding_client_rect();
                rect.set(Some(((bounds.left(), bounds.top()), (bounds.width(), bounds.height()))));
            });
        }
        {
            let rect = Rc::clone(&rect);
            let element = magnet.clone();
            dom::listen(&magnet, "pointerleave", move |_| {
                dom::set_style(&element, "transform", "");
                rect.set(None);
            });
        }
        {
            let element = magnet.clone();
            let mut throttle = Throttle::new(decor.pointer_throttle_ms);
            dom::listen(&magnet, "pointermove", move |event| {
                if !throttle.ready(dom::now_ms()) {
                    return;
                }
                let (Some((origin, size)), Some(pointer)) =
                    (rect.get(), event.dyn_ref::<MouseEvent>())
                else {
                    return;
                };
                let client = (f64::from(pointer.client_x()), f64::from(pointer.client_y()));
                let (x, y) = magnetic_offset(client, origin, size, damp);
                dom::set_style(&element, "transform", &format!("translate({x}px, {y}px)"));
            });
        }
    }
    Ok(())
}
