//! # Cart Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Caller         │  │   Persistence   │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  OutsideProvider│  │  Storage        │  │  InvalidConfig          │ │
//! │  │  InvalidProduct │  │  Record         │  │  ConfigLoadFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing ids, zero quantities and duplicate adds are not errors.

use gomarketplace_core::CoreError;
use gomarketplace_storage::StorageError;
use thiserror::Error;

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartError>;

/// Errors surfaced by the Cart Store and its provider.
#[derive(Debug, Error)]
pub enum CartError {
    /// `use_cart` was called from a scope with no active provider.
    ///
    /// A wiring bug in the calling code, never a data condition.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,

    /// An add candidate was rejected before touching the cart.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[source] CoreError),

    /// The durable store failed.
    ///
    /// On a mutation the in-memory cart has already been updated and stays
    /// updated; only the durable mirror is behind.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted record could not be encoded or decoded.
    #[error(transparent)]
    Record(#[from] CoreError),

    /// Configuration values are invalid.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}
