//! Off-canvas mobile menu.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use crate::app::dom::{self, DomResult};
use crate::core::nav::{MobileNav, NavInput};

struct MenuController {
    burger: Element,
    menu: HtmlElement,
    state: MobileNav,
}

impl MenuController {
    fn handle(&mut self, input: NavInput) {
        if let Some(open) = self.state.handle(input) {
            self.render(open);
        }
    }

    fn render(&self, open: bool) {
        dom::set_attr(&self.burger, "aria-expanded", if open { "true" } else { "false" });
        self.menu.set_hidden(!open);
        if let Ok(body) = dom::body() {
            dom::set_style(&body, "overflow", if open { "hidden" } else { "" });
        }
        dom::toggle_class(&self.menu, "is-open", open);
    }

    fn contains_target(&self, event: &Event) -> bool {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return false;
        };
        self.menu.contains(Some(&target)) || self.burger.contains(Some(&target))
    }
}

pub(crate) fn init() -> DomResult<()> {
    let burger = dom::by_id::<Element>("burgerBtn")?;
    let menu = dom::by_id::<HtmlElement>("mobileMenu")?;
    let controller = Rc::new(RefCell::new(MenuController {
        burger: burger.clone(),
        menu,
        state: MobileNav::default(),
    }));

    {
        let controller = Rc::clone(&controller);
        dom::listen(&burger, "click", move |event| {
            event.stop_propagation();
            controller.borrow_mut().handle(NavInput::Burger);
        });
    }
    for link in dom::query_all(".mLink") {
        let controller = Rc::clone(&controller);
        dom::listen(&link, "click", move |_| {
            controller.borrow_mut().handle(NavInput::LinkFollowed);
        });
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&document(), "click", move |event| {
            let mut controller = controller.borrow_mut();
            if controller.state.is_open() && !controller.contains_target(event) {
                controller.handle(NavInput::OutsideClick);
            }
        });
    }
    {
        let controller = Rc::clone(&controller);
        dom::listen(&document(), "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if escape {
                controller.borrow_mut().handle(NavInput::Escape);
            }
        });
    }
    Ok(())
}
