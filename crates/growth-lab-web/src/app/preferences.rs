//! Local-storage persistence for the theme flag.

use gloo::storage::{LocalStorage, Storage};

use crate::app::dom;
use crate::core::error::StorageError;
use crate::core::theme::ThemeStore;

/// [`ThemeStore`] backed by `window.localStorage`.
///
/// The value is stored unquoted (`dark`, not `"dark"`) so the inline head
/// script that paints the theme before wasm loads can read it verbatim.
#[derive(Clone, Debug)]
pub(crate) struct LocalThemeStore {
    key: String,
}

impl LocalThemeStore {
    pub(crate) const fn new(key: String) -> Self {
        Self { key }
    }
}

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw().get_item(&self.key).ok().flatten()
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(&self.key, value)
            .map_err(|err| StorageError {
                key: self.key.clone(),
                detail: format!("{err:?}"),
            })
    }
}

/// `(prefers-color-scheme: dark)` when `matchMedia` exists.
pub(crate) fn os_prefers_dark() -> Option<bool> {
    dom::media_matches("(prefers-color-scheme: dark)")
}
