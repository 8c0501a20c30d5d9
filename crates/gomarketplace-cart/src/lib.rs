//! # gomarketplace-cart: Cart Store
//!
//! The single stateful component of the cart: an in-memory ordered list of
//! line items, mirrored into durable storage after every mutation and
//! restored from it once at startup.
//!
//! ## Module Organization
//! ```text
//! gomarketplace_cart/
//! ├── lib.rs          ◄─── You are here
//! ├── store.rs        ◄─── CartStore: load, add/increment/decrement, persist
//! ├── provider.rs     ◄─── CartProvider, Scope, use_cart()
//! ├── config.rs       ◄─── CartConfig (TOML + env)
//! └── error.rs        ◄─── CartError
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use gomarketplace_cart::{use_cart, CartConfig, CartProvider, CartStore, Scope};
//! use gomarketplace_storage::{SqliteStore, StorageConfig};
//!
//! let config = CartConfig::load_or_default(None);
//! let storage = SqliteStore::new(StorageConfig::new("cart.db")).await?;
//! let provider = CartProvider::new(CartStore::new(Arc::new(storage), &config));
//! provider.activate().await?;
//!
//! let scope = Scope::root().provide(&provider);
//! let cart = use_cart(&scope)?;
//! cart.increment("p1").await?;
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod store;

pub use config::{CartConfig, LoadPolicy};
pub use error::{CartError, CartResult};
pub use provider::{use_cart, CartHandle, CartProvider, Scope};
pub use store::{CartStore, LoadOutcome};
