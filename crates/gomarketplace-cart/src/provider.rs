//! # Provider Scope
//!
//! Hands the Cart Store to consumers by explicit handle instead of a hidden
//! global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Provider / Consumer                              │
//! │                                                                         │
//! │  startup                                                               │
//! │    let provider = CartProvider::new(store);                            │
//! │    provider.activate().await?;     ── load-on-init, once               │
//! │    let scope = Scope::root().provide(&provider);                       │
//! │                                                                         │
//! │  consumer (anywhere the scope is passed)                               │
//! │    let cart = use_cart(&scope)?;   ── CartHandle                       │
//! │    cart.products()                                                     │
//! │    cart.add_to_cart(&candidate).await                                  │
//! │    cart.increment(id).await / cart.decrement(id).await                 │
//! │                                                                         │
//! │  consumer given Scope::root()                                          │
//! │    use_cart(&scope) ── Err(CartError::OutsideProvider)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use gomarketplace_core::{Cart, LineItem, NewLineItem};
use tracing::info;

use crate::error::{CartError, CartResult};
use crate::store::{CartStore, LoadOutcome};

/// Owns the store for the lifetime of the app.
#[derive(Debug, Clone)]
pub struct CartProvider {
    store: Arc<CartStore>,
}

impl CartProvider {
    /// Wraps a freshly built store.
    pub fn new(store: CartStore) -> Self {
        CartProvider {
            store: Arc::new(store),
        }
    }

    /// Runs load-on-init. Later calls return [`LoadOutcome::AlreadyLoaded`].
    ///
    /// Consumers may use the cart before this resolves; they see it empty.
    pub async fn activate(&self) -> CartResult<LoadOutcome> {
        let outcome = self.store.load().await?;
        info!(?outcome, "Cart provider activated");
        Ok(outcome)
    }

    /// Returns a consumer handle.
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            store: Arc::clone(&self.store),
        }
    }
}

/// The cart as consumers see it: current items plus the three mutations.
///
/// Cheap to clone; every clone talks to the same store.
#[derive(Debug, Clone)]
pub struct CartHandle {
    store: Arc<CartStore>,
}

impl CartHandle {
    /// Current items in cart order.
    pub fn products(&self) -> Vec<LineItem> {
        self.store.products()
    }

    /// Current cart snapshot.
    pub fn cart(&self) -> Cart {
        self.store.cart()
    }

    /// Adds one unit of `candidate`. See [`CartStore::add_to_cart`].
    pub async fn add_to_cart(&self, candidate: &NewLineItem) -> CartResult<Cart> {
        self.store.add_to_cart(candidate).await
    }

    /// Adds one unit to the item with `id`.
    pub async fn increment(&self, id: &str) -> CartResult<Cart> {
        self.store.increment(id).await
    }

    /// Removes one unit from the item with `id`, stopping at zero.
    pub async fn decrement(&self, id: &str) -> CartResult<Cart> {
        self.store.decrement(id).await
    }
}

/// The region of the app a consumer runs in.
///
/// A scope either carries a provider's handle or it doesn't; nested scopes
/// inherit the nearest provider.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    cart: Option<CartHandle>,
}

impl Scope {
    /// A scope with no provider.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a child scope in which `provider` is active.
    pub fn provide(&self, provider: &CartProvider) -> Scope {
        Scope {
            cart: Some(provider.handle()),
        }
    }

    /// Returns a child scope inheriting this scope's provider.
    pub fn child(&self) -> Scope {
        self.clone()
    }
}

/// Returns the cart of the nearest provider.
///
/// ## Errors
/// [`CartError::OutsideProvider`] when no provider is active in `scope`.
pub fn use_cart(scope: &Scope) -> CartResult<CartHandle> {
    scope.cart.clone().ok_or(CartError::OutsideProvider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use gomarketplace_storage::MemoryStore;

    fn provider() -> CartProvider {
        CartProvider::new(CartStore::new(
            Arc::new(MemoryStore::new()),
            &CartConfig::default(),
        ))
    }

    #[test]
    fn test_use_cart_outside_provider_fails() {
        let err = use_cart(&Scope::root()).unwrap_err();
        assert!(matches!(err, CartError::OutsideProvider));

        let err = use_cart(&Scope::root().child()).unwrap_err();
        assert!(matches!(err, CartError::OutsideProvider));
    }

    #[tokio::test]
    async fn test_consumers_share_one_store() {
        let provider = provider();
        provider.activate().await.unwrap();
        let scope = Scope::root().provide(&provider);

        let badge = use_cart(&scope.child()).unwrap();
        let list = use_cart(&scope).unwrap();

        list.add_to_cart(&NewLineItem::new("p1", "Shirt", "u", 10.0))
            .await
            .unwrap();
        badge.increment("p1").await.unwrap();

        assert_eq!(list.products()[0].quantity, 2);
        assert_eq!(badge.cart().total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_activate_twice() {
        let provider = provider();
        assert_eq!(provider.activate().await.unwrap(), LoadOutcome::Empty);
        assert_eq!(
            provider.activate().await.unwrap(),
            LoadOutcome::AlreadyLoaded
        );
    }
}
