//! # Error Types
//!
//! Domain-specific error types for gomarketplace-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gomarketplace-core (this file)                                        │
//! │  └── CoreError      - Record encode/decode failures                    │
//! │                                                                         │
//! │  gomarketplace-storage                                                 │
//! │  └── StorageError   - Key-value store failures                         │
//! │                                                                         │
//! │  gomarketplace-cart                                                    │
//! │  └── CartError      - What consumers of the store see                  │
//! │                                                                         │
//! │  Flow: CoreError / StorageError → CartError → CliError → stdout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart rules themselves never fail: a missing id, a zero quantity or a
//! duplicate add are absorbed as no-ops or merges. The errors at this level
//! come from the persisted record, or from a price JSON cannot represent.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted record is not a JSON array of line items.
    ///
    /// ## When This Occurs
    /// - Record was written by an incompatible app version
    /// - Record was truncated by an interrupted write
    /// - A quantity in the record is negative
    #[error("Malformed cart record: {0}")]
    MalformedRecord(#[source] serde_json::Error),

    /// A price is NaN or infinite.
    ///
    /// JSON has no encoding for these; serde_json would write `null` and the
    /// record would no longer decode.
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: String, price: f64 },

    /// The cart could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
