use wasm_bindgen::JsValue;

use super::{StorageBackend, StoreError};

/// The browser's `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Resolve `localStorage` for the current window.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` outside a window, or when the browser denies
    /// access (private mode, disabled cookies).
    pub fn open() -> Result<Self, StoreError> {
        let Some(window) = web_sys::window() else {
            return Err(StoreError::Unavailable("no window".to_owned()));
        };
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable("localStorage is not supported".to_owned())),
            Err(err) => Err(StoreError::Unavailable(describe(&err))),
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| StoreError::Read { key: key.to_owned(), reason: describe(&err) })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write { key: key.to_owned(), reason: describe(&err) })
    }
}
