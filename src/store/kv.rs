#[cfg(test)]
#[path = "kv_test.rs"]
mod kv_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{StorageBackend, StoreError};
use crate::util::logger::Logger;

/// JSON-encoding wrapper over a `StorageBackend`.
pub struct KvStore<B> {
    backend: B,
    log: Logger,
}

impl<B: StorageBackend> KvStore<B> {
    pub fn new(backend: B, log: Logger) -> Self {
        Self { backend, log }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load and decode the value for `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and returns `Decode` for values that are
    /// not valid JSON for `T`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::Decode { key: key.to_owned(), reason: err.to_string() })
    }

    /// Encode and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `Encode` when serialization fails and propagates backend
    /// failures.
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StoreError::Encode { key: key.to_owned(), reason: err.to_string() })?;
        self.backend.set_item(key, &raw)
    }

    /// Load the value for `key`, or `default` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                self.log.debug(format_args!("{key} not set, using default"));
                default
            }
            Err(err) => {
                self.log.warn(format_args!("{err}; using default"));
                default
            }
        }
    }

    /// Store `value` under `key`. Returns whether the write landed.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(err) => {
                self.log.error(err);
                false
            }
        }
    }
}
