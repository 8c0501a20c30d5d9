//! # Cart
//!
//! The ordered, id-unique collection of line items and its mutation rules.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation          id present                 id absent                │
//! │  ─────────────────  ─────────────────────────  ──────────────────────── │
//! │  with_added         quantity + 1,              append { .., qty: 1 }    │
//! │                     candidate fields ignored                            │
//! │  with_incremented   quantity + 1               unchanged                │
//! │  with_decremented   quantity - 1 if > 0        unchanged                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule takes `&self` and returns a new `Cart`. The store installs the
//! result in one step, so a reader never sees a half-applied mutation.
//! All operations are linear scans; carts hold tens of items.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, NewLineItem};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` when built through [`Cart::with_added`]
/// - Appended items keep insertion order; updates happen in place
/// - Quantities never go below zero
///
/// Serializes as a bare JSON array, which is the persisted record format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of `candidate`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity increases by one. The stored title, image
    ///   and price are kept; the candidate's values are discarded.
    /// - Not in cart: a new item with quantity 1 is appended.
    pub fn with_added(&self, candidate: &NewLineItem) -> Cart {
        if self.contains(&candidate.id) {
            return self.with_incremented(&candidate.id);
        }

        let mut items = self.items.clone();
        items.push(LineItem::from_candidate(candidate));
        Cart { items }
    }

    /// Adds one unit to every item matching `id`.
    pub fn with_incremented(&self, id: &str) -> Cart {
        self.map_matching(id, LineItem::incremented)
    }

    /// Removes one unit from every item matching `id`, never going below zero.
    ///
    /// Items that reach zero stay in the cart.
    pub fn with_decremented(&self, id: &str) -> Cart {
        self.map_matching(id, LineItem::decremented)
    }

    fn map_matching(&self, id: &str, f: impl Fn(&LineItem) -> LineItem) -> Cart {
        let items = self
            .items
            .iter()
            .map(|item| if item.id == id { f(item) } else { item.clone() })
            .collect();
        Cart { items }
    }

    /// Returns the items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consumes the cart, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks whether an item with `id` is in the cart.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of units across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Cart { items }
    }
}
