//! # CLI Error Type
//!
//! What a failed command prints.
//!
//! ```text
//! StorageError ──┐
//!                ├──► CliError { code, message } ──► stdout (JSON), exit 1
//! CartError ─────┘
//! ```

use gomarketplace_cart::CartError;
use gomarketplace_storage::StorageError;
use serde::Serialize;

/// Error printed by a failed command.
///
/// ```json
/// { "code": "STORAGE_ERROR", "message": "Cart could not be saved" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Durable storage failed
    StorageError,

    /// The stored cart record is unreadable
    CorruptRecord,

    /// Bad configuration
    ConfigError,

    /// A product argument was rejected
    InvalidInput,

    /// Wiring bug (cart used outside its provider)
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage error: {}", err);
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<CartError> for CliError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::OutsideProvider => {
                tracing::error!("Cart used outside provider scope");
                CliError::new(ErrorCode::Internal, err.to_string())
            }
            CartError::InvalidProduct(e) => CliError::new(ErrorCode::InvalidInput, e.to_string()),
            CartError::Storage(e) => CliError::from(e),
            CartError::Record(e) => CliError::new(ErrorCode::CorruptRecord, e.to_string()),
            CartError::InvalidConfig(_) | CartError::ConfigLoadFailed(_) => {
                CliError::config(err.to_string())
            }
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}
