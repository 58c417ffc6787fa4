//! Off-canvas mobile menu state.

/// Input that may change the menu state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavInput {
    /// Burger button pressed.
    Burger,
    /// A menu link was followed.
    LinkFollowed,
    /// A click landed outside both the menu and the burger.
    OutsideClick,
    /// Escape was pressed.
    Escape,
}

/// Open/closed menu state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Apply an input; returns the new state when it changed.
    pub fn handle(&mut self, input: NavInput) -> Option<bool> {
        let next = match input {
            NavInput::Burger => !self.open,
            NavInput::LinkFollowed | NavInput::OutsideClick | NavInput::Escape => false,
        };
        if next == self.open {
            return None;
        }
        self.open = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burger_toggles() {
        let mut nav = MobileNav::default();
        assert_eq!(nav.handle(NavInput::Burger), Some(true));
        assert_eq!(nav.handle(NavInput::Burger), Some(false));
    }

    #[test]
    fn dismissals_only_fire_when_open() {
        let mut nav = MobileNav::default();
        assert_eq!(nav.handle(NavInput::Escape), None);
        assert_eq!(nav.handle(NavInput::OutsideClick), None);
        nav.handle(NavInput::Burger);
        assert_eq!(nav.handle(NavInput::OutsideClick), Some(false));
        nav.handle(NavInput::Burger);
        assert_eq!(nav.handle(NavInput::LinkFollowed), Some(false));
        nav.handle(NavInput::Burger);
        assert_eq!(nav.handle(NavInput::Escape), Some(false));
        assert!(!nav.is_open());
    }
}
