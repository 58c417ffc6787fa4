//! Accordion disclosure state for benefit and service blocks.

use crate::core::copy::{COLLAPSED_ICON, EXPANDED_ICON, SERVICE_LESS, SERVICE_MORE};

/// How a benefit block should look.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView {
    /// Whether the `expanded` class is set.
    pub expanded: bool,
    /// Inline `max-height` for the details element.
    pub max_height: String,
    /// Text of the `+`/`−` icon.
    pub icon: &'static str,
}

impl PanelView {
    /// View for a panel whose details measure `scroll_height` pixels.
    #[must_use]
    pub fn new(expanded: bool, scroll_height: i32) -> Self {
        if expanded {
            Self {
                expanded,
                max_height: format!("{scroll_height}px"),
                icon: EXPANDED_ICON,
            }
        } else {
            Self {
                expanded,
                max_height: "0".to_string(),
                icon: COLLAPSED_ICON,
            }
        }
    }
}

/// Expand/collapse state of one benefit block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    expanded: bool,
    collapse_pending: bool,
}

impl Disclosure {
    /// Whether the panel is open.
    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.expanded
    }

    /// Click toggle used on touch devices.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.collapse_pending = false;
        self.expanded
    }

    /// Pointer entered the header: cancel any pending collapse and open.
    ///
    /// Returns `true` when the panel was closed and must be expanded.
    pub fn hover_enter(&mut self) -> bool {
        self.collapse_pending = false;
        if self.expanded {
            return false;
        }
        self.expanded = true;
        true
    }

    /// Pointer left the header: a delayed collapse is now pending.
    pub fn hover_leave(&mut self) {
        self.collapse_pending = true;
    }

    /// Delayed collapse fired. Returns `true` when the panel must collapse.
    pub fn collapse_due(&mut self) -> bool {
        if !self.collapse_pending {
            return false;
        }
        self.collapse_pending = false;
        self.expanded = false;
        true
    }
}

/// What clicking a service "more" link does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceToggle {
    /// Insert a details block with this text and relabel the link.
    Expand {
        /// Paragraph text from `data-details`.
        text: String,
        /// New link label.
        label: &'static str,
    },
    /// Collapse and remove the existing details block.
    Collapse {
        /// New link label.
        label: &'static str,
    },
    /// Nothing to show.
    None,
}

/// Decide the service toggle from the current DOM state.
#[must_use]
pub fn service_toggle(details_present: bool, data_details: Option<&str>) -> ServiceToggle {
    if details_present {
        return ServiceToggle::Collapse {
            label: SERVICE_MORE,
        };
    }
    match data_details.filter(|text| !text.is_empty()) {
        Some(text) => ServiceToggle::Expand {
            text: text.to_string(),
            label: SERVICE_LESS,
        },
        None => ServiceToggle::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reflects_state() {
        assert_eq!(
            PanelView::new(true, 120),
            PanelView {
                expanded: true,
                max_height: "120px".into(),
                icon: "−"
            }
        );
        assert_eq!(PanelView::new(false, 120).max_height, "0");
        assert_eq!(PanelView::new(false, 120).icon, "+");
    }

    #[test]
    fn hover_reentry_cancels_collapse() {
        let mut panel = Disclosure::default();
        assert!(panel.hover_enter());
        panel.hover_leave();
        assert!(!panel.hover_enter());
        assert!(!panel.collapse_due());
        assert!(panel.expanded());
    }

    #[test]
    fn hover_leave_collapses_after_delay() {
        let mut panel = Disclosure::default();
        panel.hover_enter();
        panel.hover_leave();
        assert!(panel.collapse_due());
        assert!(!panel.expanded());
        assert!(!panel.collapse_due());
    }

    #[test]
    fn click_toggle_flips() {
        let mut panel = Disclosure::default();
        assert!(panel.toggle());
        assert!(!panel.toggle());
    }

    #[test]
    fn service_toggle_follows_dom() {
        assert_eq!(
            service_toggle(true, Some("x")),
            ServiceToggle::Collapse {
                label: "Подробнее →"
            }
        );
        assert_eq!(
            service_toggle(false, Some("Аудит")),
            ServiceToggle::Expand {
                text: "Аудит".into(),
                label: "Скрыть"
            }
        );
        assert_eq!(service_toggle(false, None), ServiceToggle::None);
        assert_eq!(service_toggle(false, Some("")), ServiceToggle::None);
    }
}
