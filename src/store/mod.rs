//! Persistent key-value storage with JSON encoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page persists exactly one value (the background color), but the store
//! is generic over any `serde` value. Backends sit behind `StorageBackend` so
//! the browser's `localStorage` and the in-process `MemoryStorage` are
//! interchangeable; boot falls back to memory when the browser store is
//! disabled.
//!
//! ERROR HANDLING
//! ==============
//! `KvStore::get`/`set` never propagate: failures are logged and replaced by
//! the caller's default. `try_get`/`try_set` expose the same operations as
//! `Result` for callers that want to branch.

mod kv;
#[cfg(feature = "csr")]
mod local;
mod memory;

pub use kv::KvStore;
#[cfg(feature = "csr")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage read failed for {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("could not encode value for {key}: {reason}")]
    Encode { key: String, reason: String },
    #[error("could not decode value for {key}: {reason}")]
    Decode { key: String, reason: String },
}

/// Raw string storage, as exposed by the browser's `Storage` interface.
pub trait StorageBackend {
    /// Read the raw value for `key`; `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` or `Read` when the backend cannot be accessed.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` or `Write` (e.g. quota exceeded).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}
