//! # gomarketplace-core: Pure Cart Rules
//!
//! The pure heart of the GoMarketplace cart. Everything here is
//! deterministic and free of I/O; storage lives in `gomarketplace-storage`
//! and the stateful store in `gomarketplace-cart`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarketplace Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Consumers (mobile UI, CLI)                     │   │
//! │  │      Product list ──► Cart badge ──► Cart screen                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ use_cart()                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              gomarketplace-cart (CartStore)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ gomarketplace-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │   cart    │      │   codec   │          │   │
//! │  │   │ LineItem  │      │   Cart    │      │ JSON      │          │   │
//! │  │   │ NewLine.. │      │  rules    │      │ record    │          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `LineItem` and the add candidate `NewLineItem`
//! - [`cart`] - The ordered, id-unique `Cart` and its mutation rules
//! - [`codec`] - JSON encoding of the persisted cart record
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gomarketplace_core::{Cart, NewLineItem};
//!
//! let shirt = NewLineItem::new("p1", "Shirt", "u", 10.0);
//!
//! let cart = Cart::new().with_added(&shirt).with_incremented("p1");
//! assert_eq!(cart.get("p1").map(|item| item.quantity), Some(2));
//!
//! let json = gomarketplace_core::codec::encode(&cart).unwrap();
//! assert_eq!(gomarketplace_core::codec::decode(&json).unwrap(), cart);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult};
pub use types::{LineItem, NewLineItem};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key the cart record is read from and written to.
pub const CART_STORAGE_KEY: &str = "@gomarketplace:products";

/// Key the original mobile app cleared before every write.
///
/// It differs from [`CART_STORAGE_KEY`], so the clear never touched the
/// record it was about to overwrite. Kept so deployments can reproduce
/// that behavior through configuration.
pub const LEGACY_CLEAR_KEY: &str = "@marketplace:products";
