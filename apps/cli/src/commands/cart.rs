//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   add    ┌──────────┐  increment / decrement              │
//! │  │  Empty   │────────►│ In Cart  │◄──────────┐                         │
//! │  │  Cart    │         │          │───────────┘                         │
//! │  └──────────┘         └──────────┘                                      │
//! │                            │                                            │
//! │                  every change is persisted                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use gomarketplace_cart::CartHandle;
use gomarketplace_core::{Cart, LineItem, NewLineItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// Cart counts for command output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Cart response including items and counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartHandle) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(&cart.cart())
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Product already in cart: quantity increases, stored fields kept
/// - Product not in cart: appended with quantity 1
pub async fn add_to_cart(
    cart: &CartHandle,
    candidate: NewLineItem,
) -> Result<CartResponse, CliError> {
    debug!(id = %candidate.id, "add_to_cart command");
    let updated = cart.add_to_cart(&candidate).await?;
    Ok(CartResponse::from(&updated))
}

/// Adds one unit to an item already in the cart.
pub async fn increment(cart: &CartHandle, id: &str) -> Result<CartResponse, CliError> {
    debug!(id = %id, "increment command");
    let updated = cart.increment(id).await?;
    Ok(CartResponse::from(&updated))
}

/// Removes one unit from an item, stopping at zero.
pub async fn decrement(cart: &CartHandle, id: &str) -> Result<CartResponse, CliError> {
    debug!(id = %id, "decrement command");
    let updated = cart.decrement(id).await?;
    Ok(CartResponse::from(&updated))
}
