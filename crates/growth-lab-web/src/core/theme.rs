//! Light/dark theme preference: parsing, resolution and persistence.

use crate::core::error::StorageError;

/// Light or dark theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme mode.
    #[default]
    Light,
    /// Dark theme mode.
    Dark,
}

impl ThemeMode {
    /// String identifier used in storage and the `data-theme` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Unknown values are treated as absent.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether the dark palette is active.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Resolve the effective theme: stored value, then OS preference, then light.
#[must_use]
pub fn resolve_theme(stored: Option<&str>, os_prefers_dark: Option<bool>) -> ThemeMode {
    if let Some(mode) = stored.and_then(ThemeMode::parse) {
        return mode;
    }
    match os_prefers_dark {
        Some(true) => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// Key-value storage holding the single theme flag.
pub trait ThemeStore {
    /// Read the raw stored value, if any.
    fn load(&self) -> Option<String>;
    /// Persist the raw value.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend rejects the write.
    fn save(&mut self, value: &str) -> Result<(), StorageError>;
}

/// Reads and writes the theme preference through a [`ThemeStore`].
///
/// The OS preference is captured at construction; the current value is always
/// re-resolved from storage so the stored flag and the applied theme cannot
/// drift apart.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
    os_prefers_dark: Option<bool>,
}

impl<S: ThemeStore> ThemePreference<S> {
    /// Wrap a store together with the OS colour-scheme reading.
    #[must_use]
    pub const fn new(store: S, os_prefers_dark: Option<bool>) -> Self {
        Self {
            store,
            os_prefers_dark,
        }
    }

    /// Currently effective theme.
    #[must_use]
    pub fn current(&self) -> ThemeMode {
        resolve_theme(self.store.load().as_deref(), self.os_prefers_dark)
    }

    /// Persist `mode` as the applied theme.
    ///
    /// Callers paint `mode` only after this succeeds; a rejected write leaves
    /// [`Self::current`] on the previous value.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the store rejects the write.
    pub fn apply(&mut self, mode: ThemeMode) -> Result<ThemeMode, StorageError> {
        self.store.save(mode.as_str())?;
        tracing::debug!(theme = mode.as_str(), "theme applied");
        Ok(mode)
    }

    /// Flip the current theme and persist the result.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the store rejects the write.
    pub fn toggle(&mut self) -> Result<ThemeMode, StorageError> {
        let next = self.current().toggled();
        self.apply(next)
    }

    /// Borrow the underlying store.
    #[cfg(test)]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore(Option<String>);

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.0.clone()
        }

        fn save(&mut self, value: &str) -> Result<(), StorageError> {
            self.0 = Some(value.to_string());
            Ok(())
        }
    }

    struct BlockedStore(Option<String>);

    impl ThemeStore for BlockedStore {
        fn load(&self) -> Option<String> {
            self.0.clone()
        }

        fn save(&mut self, _value: &str) -> Result<(), StorageError> {
            Err(StorageError {
                key: "theme".to_string(),
                detail: "SecurityError".to_string(),
            })
        }
    }

    #[test]
    fn theme_mode_to_str() {
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn resolution_prefers_storage_then_os() {
        assert_eq!(resolve_theme(Some("dark"), Some(false)), ThemeMode::Dark);
        assert_eq!(resolve_theme(Some("light"), Some(true)), ThemeMode::Light);
        assert_eq!(resolve_theme(None, Some(true)), ThemeMode::Dark);
        assert_eq!(resolve_theme(None, Some(false)), ThemeMode::Light);
        assert_eq!(resolve_theme(None, None), ThemeMode::Light);
        assert_eq!(resolve_theme(Some("sepia"), Some(true)), ThemeMode::Dark);
    }

    #[test]
    fn toggling_twice_restores_original() -> Result<(), StorageError> {
        let mut pref = ThemePreference::new(MemoryStore::default(), Some(true));
        let original = pref.current();
        pref.toggle()?;
        assert_eq!(pref.toggle()?, original);
        Ok(())
    }

    #[test]
    fn stored_value_tracks_last_applied() -> Result<(), StorageError> {
        let mut pref = ThemePreference::new(MemoryStore::default(), None);
        let applied = pref.toggle()?;
        assert_eq!(pref.store().0.as_deref(), Some(applied.as_str()));
        let applied = pref.apply(ThemeMode::Light)?;
        assert_eq!(pref.store().0.as_deref(), Some(applied.as_str()));
        Ok(())
    }

    #[test]
    fn rejected_write_keeps_the_previous_theme() {
        let mut pref = ThemePreference::new(BlockedStore(Some("dark".to_string())), None);
        let err = pref.toggle().err();
        assert_eq!(err.map(|err| err.key), Some("theme".to_string()));
        assert_eq!(pref.current(), ThemeMode::Dark);
    }

    #[test]
    fn first_visit_follows_os() {
        let pref = ThemePreference::new(MemoryStore::default(), Some(true));
        assert_eq!(pref.current(), ThemeMode::Dark);
        assert!(pref.store().0.is_none());
    }
}
