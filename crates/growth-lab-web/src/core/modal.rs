//! Stack-of-one modal bookkeeping.

/// DOM change the controller must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalChange {
    /// Hide the modal with this id.
    Close(String),
    /// Show the modal with this id.
    Open(String),
}

/// At most one modal is open at a time; opening another closes the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalStack {
    active: Option<String>,
}

impl ModalStack {
    /// Id of the open modal.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Open `id`, closing any other open modal first.
    ///
    /// Re-opening the active modal is a no-op.
    pub fn open(&mut self, id: &str) -> Vec<ModalChange> {
        if self.active.as_deref() == Some(id) {
            return Vec::new();
        }
        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.active.take() {
            changes.push(ModalChange::Close(previous));
        }
        self.active = Some(id.to_string());
        changes.push(ModalChange::Open(id.to_string()));
        changes
    }

    /// Close `id`.
    ///
    /// The change is emitted even when `id` is not the tracked modal so a
    /// stray open overlay can always be dismissed; the active slot is cleared
    /// either way.
    pub fn close(&mut self, id: &str) -> ModalChange {
        self.active = None;
        ModalChange::Close(id.to_string())
    }

    /// Close whatever is open (Escape, page hide).
    pub fn close_active(&mut self) -> Option<ModalChange> {
        self.active.take().map(ModalChange::Close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_second_closes_first() {
        let mut stack = ModalStack::default();
        assert_eq!(stack.open("brief"), vec![ModalChange::Open("brief".into())]);
        assert_eq!(
            stack.open("callback"),
            vec![
                ModalChange::Close("brief".into()),
                ModalChange::Open("callback".into())
            ]
        );
        assert_eq!(stack.active(), Some("callback"));
    }

    #[test]
    fn reopening_active_is_noop() {
        let mut stack = ModalStack::default();
        stack.open("brief");
        assert!(stack.open("brief").is_empty());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut stack = ModalStack::default();
        assert_eq!(stack.close_active(), None);
        stack.open("brief");
        assert_eq!(
            stack.close_active(),
            Some(ModalChange::Close("brief".into()))
        );
        assert_eq!(stack.active(), None);
    }

    #[test]
    fn explicit_close_clears_active() {
        let mut stack = ModalStack::default();
        stack.open("callback");
        assert_eq!(stack.close("callback"), ModalChange::Close("callback".into()));
        assert_eq!(stack.active(), None);
    }
}
