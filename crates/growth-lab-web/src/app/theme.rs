//! Theme toggle: paints the root element and every toggle icon pair.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, HtmlElement};

use crate::app::dom::{self, DomResult};
use crate::app::preferences::{self, LocalThemeStore};
use crate::core::config::LandingConfig;
use crate::core::theme::{ThemeMode, ThemePreference};

const TOGGLE_IDS: [&str; 2] = ["themeToggle", "themeToggleMobile"];

struct ThemeController {
    root: Element,
    preference: ThemePreference<LocalThemeStore>,
}

impl ThemeController {
    fn paint(&self, mode: ThemeMode) {
        let dark = mode.is_dark();
        dom::toggle_class(&self.root, "dark-theme", dark);
        dom::set_attr(&self.root, "data-theme", mode.as_str());
        for toggle in dom::query_all(".theme-toggle") {
            let sun = dom::query_in::<HtmlElement>(&toggle, ".theme-icon.sun");
            let moon = dom::query_in::<HtmlElement>(&toggle, ".theme-icon.moon");
            if let (Ok(sun), Ok(moon)) = (sun, moon) {
                dom::set_style(&sun, "display", if dark { "none" } else { "block" });
                dom::set_style(&moon, "display", if dark { "block" } else { "none" });
            }
        }
    }

    /// First paint; the resolved theme shows even when storage is blocked.
    fn restore(&mut self, mode: ThemeMode) {
        if let Err(err) = self.preference.apply(mode) {
            tracing::warn!(key = %err.key, detail = %err.detail, "theme not persisted");
        }
        self.paint(mode);
    }

    fn toggle(&mut self) {
        match self.preference.toggle() {
            Ok(mode) => self.paint(mode),
            Err(err) => {
                tracing::warn!(key = %err.key, detail = %err.detail, "theme toggle not persisted");
            }
        }
    }
}

/// Apply the resolved theme and bind both toggle buttons.
pub(crate) fn init(config: &LandingConfig) -> DomResult<()> {
    let store = LocalThemeStore::new(config.theme.storage_key.clone());
    let preference = ThemePreference::new(store, preferences::os_prefers_dark());
    let initial = preference.current();
    let controller = Rc::new(RefCell::new(ThemeController {
        root: dom::root()?,
        preference,
    }));
    controller.borrow_mut().restore(initial);

    for id in TOGGLE_IDS {
        let Ok(button) = dom::by_id::<Element>(id) else {
            continue;
        };
        let controller = Rc::clone(&controller);
        dom::listen(&button, "click", move |_| controller.borrow_mut().toggle());
    }
    Ok(())
}
