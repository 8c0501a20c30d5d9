//! # gomarketplace-storage: Durable Key-Value Storage
//!
//! The local persistent key-value store the cart record is mirrored into.
//! It plays the part the device's async storage plays for the mobile app:
//! string keys, string values, asynchronous `get` / `set` / `remove`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarketplace Data Flow                            │
//! │                                                                         │
//! │  CartStore::increment("p1")                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               gomarketplace-storage (THIS CRATE)                │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │  SqliteStore  │    │  Migrations  │  │   │
//! │  │   │   (kv.rs)     │◄───│  (sqlite.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get/set/remove│◄───│  MemoryStore  │    │ 001_kv_store │  │   │
//! │  │   │               │    │  (memory.rs)  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data_dir>/cart.db   (table kv_store)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gomarketplace_storage::{KeyValueStore, SqliteStore, StorageConfig};
//!
//! let store = SqliteStore::new(StorageConfig::new("cart.db")).await?;
//! store.set("@gomarketplace:products", "[]").await?;
//! assert_eq!(store.get("@gomarketplace:products").await?.as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StorageConfig};
