//! # Domain Types
//!
//! Line item types shared by the cart rules, the persisted record and the
//! mobile UI.
//!
//! ```text
//! ┌─────────────────────────┐         ┌─────────────────────────┐
//! │      NewLineItem        │  add    │        LineItem         │
//! │  ─────────────────────  │ ──────► │  ─────────────────────  │
//! │  id                     │         │  id                     │
//! │  title                  │         │  title      (snapshot)  │
//! │  image_url              │         │  image_url  (snapshot)  │
//! │  price                  │         │  price      (snapshot)  │
//! │                         │         │  quantity   (>= 0)      │
//! └─────────────────────────┘         └─────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! Title, image and price are captured when the product first enters the
//! cart and are never re-fetched. Adding the same product again only bumps
//! the quantity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// Field names follow the persisted record exactly (`image_url` stays
/// snake_case on the wire), so records written by the mobile app load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, rename = "Product")]
pub struct LineItem {
    /// External catalog key. Unique within a cart.
    pub id: String,

    /// Display name at add-time.
    pub title: String,

    /// Display image reference at add-time.
    pub image_url: String,

    /// Unit price at add-time.
    pub price: f64,

    /// Units in the cart. `u32` makes a negative quantity unrepresentable.
    pub quantity: u32,
}

impl LineItem {
    /// Builds a line item holding a single unit of `candidate`.
    pub fn from_candidate(candidate: &NewLineItem) -> Self {
        LineItem {
            id: candidate.id.clone(),
            title: candidate.title.clone(),
            image_url: candidate.image_url.clone(),
            price: candidate.price,
            quantity: 1,
        }
    }

    /// Returns a copy with one more unit.
    pub fn incremented(&self) -> Self {
        LineItem {
            quantity: self.quantity.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns a copy with one less unit, floored at zero.
    pub fn decremented(&self) -> Self {
        LineItem {
            quantity: self.quantity.saturating_sub(1),
            ..self.clone()
        }
    }
}

// =============================================================================
// New Line Item
// =============================================================================

/// A product descriptor offered to the cart, without a quantity.
///
/// Adding a candidate always means "one more unit".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, rename = "NewProduct")]
pub struct NewLineItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewLineItem {
    /// Creates a candidate from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        NewLineItem {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Checks that the candidate can be stored.
    ///
    /// ## Errors
    /// [`CoreError::InvalidPrice`] when `price` is NaN or infinite.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.price.is_finite() {
            return Err(CoreError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> NewLineItem {
        NewLineItem::new("p1", "Shirt", "u", 10.0)
    }

    #[test]
    fn test_from_candidate_starts_at_one() {
        let item = LineItem::from_candidate(&shirt());
        assert_eq!(item.id, "p1");
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.image_url, "u");
        assert_eq!(item.price, 10.0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let item = LineItem::from_candidate(&shirt());
        let once = item.decremented();
        assert_eq!(once.quantity, 0);
        assert_eq!(once.decremented().quantity, 0);
    }

    #[test]
    fn test_increment_keeps_snapshot_fields() {
        let item = LineItem::from_candidate(&shirt()).incremented();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_wire_field_names() {
        let item = LineItem::from_candidate(&shirt());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["image_url"], "u");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_validate_rejects_non_finite_price() {
        assert!(shirt().validate().is_ok());

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let candidate = NewLineItem::new("p2", "Hat", "h", price);
            assert!(matches!(
                candidate.validate(),
                Err(CoreError::InvalidPrice { ref id, .. }) if id == "p2"
            ));
        }
    }
}
