//! Persistent key-value store
//!
//! Every stateful manager (catalog, cart, journal) persists its whole state
//! as one JSON blob under a fixed key. The [`Store`] trait is the seam that
//! lets tests substitute an in-memory backend for the durable one.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod dir;
pub mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

/// Key holding the product catalog snapshot.
pub const PRODUCTS_KEY: &str = "products";

/// Key holding the in-progress cart snapshot.
pub const CART_KEY: &str = "cart";

/// Key holding the append-only sales journal.
pub const JOURNAL_KEY: &str = "salesJournal";

/// Errors raised by store backends and snapshot (de)serialization.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure while reading or writing a key.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generic get/set/delete over durable local storage.
///
/// Values are opaque strings; the managers store JSON-encoded snapshots.
/// A `set` replaces the whole value for the key; there are no partial
/// updates.
pub trait Store: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Loads and decodes the JSON snapshot stored under `key`.
///
/// # Errors
///
/// Returns a [`StoreError`] if the backend read fails or the stored blob is
/// not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key` as a whole snapshot.
///
/// # Errors
///
/// Returns a [`StoreError`] if encoding or the backend write fails.
pub fn save_json<T: Serialize>(store: &dyn Store, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;

    store.set(key, &raw)
}
