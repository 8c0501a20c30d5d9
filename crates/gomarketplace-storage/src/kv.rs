//! # Key-Value Store Contract
//!
//! The storage seam between the Cart Store and a concrete backend.
//!
//! ```text
//! CartStore ──► dyn KeyValueStore ──┬──► SqliteStore  (device storage)
//!                                   └──► MemoryStore  (tests, ephemeral)
//! ```

use async_trait::async_trait;

use crate::error::StorageResult;

/// Asynchronous string key-value storage.
///
/// ## Contract
/// - `get` returns `None` for a key that was never set or was removed
/// - `set` overwrites any previous value
/// - `remove` on a missing key succeeds
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the value stored under `key`.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
