//! # Cart Store
//!
//! Owns the authoritative in-memory cart and mirrors every mutation into
//! durable key-value storage.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  add_to_cart / increment / decrement                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  acquire writer lock ── one mutation at a time                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  (a) next = rule(snapshot)          gomarketplace-core                 │
//! │  (b) install next in memory         readers see it from here on        │
//! │  (c) storage.remove(clear_key)                                         │
//! │  (d) storage.set(storage_key, json(next))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  release writer lock                                                   │
//! │                                                                         │
//! │  NOTE: (c) and (d) are two calls, not a transaction. If (d) fails the  │
//! │        in-memory cart is kept and the error is returned.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locks
//! - `writer` (async mutex): held from snapshot to final write, so two
//!   overlapping mutations can't both start from the same snapshot.
//! - `cart` (sync RwLock): held only to copy or swap the cart. Readers
//!   never wait for storage I/O.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use gomarketplace_core::{codec, Cart, LineItem, NewLineItem};
use gomarketplace_storage::KeyValueStore;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::{CartConfig, LoadPolicy};
use crate::error::{CartError, CartResult};

/// Result of initializing the store from durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A record was found and installed.
    Restored { items: usize },

    /// No record (or an empty one); the cart starts empty.
    Empty,

    /// The record could not be read or parsed; the cart starts empty.
    Discarded { reason: String },

    /// A mutation committed before load ran, so it already overwrote the
    /// record; the in-memory cart is kept.
    Superseded,

    /// `load` already ran for this store.
    AlreadyLoaded,
}

/// The Cart Store.
///
/// Construct once at startup and share through [`crate::CartProvider`].
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
    clear_key: String,
    policy: LoadPolicy,
    cart: RwLock<Cart>,
    writer: Mutex<()>,
    loaded: AtomicBool,
    commits: AtomicU64,
}

impl CartStore {
    /// Creates a store with an empty cart.
    ///
    /// Nothing is read until [`CartStore::load`] runs.
    pub fn new(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Self {
        CartStore {
            storage,
            storage_key: config.storage_key().to_string(),
            clear_key: config.clear_key().to_string(),
            policy: config.load.policy,
            cart: RwLock::new(Cart::new()),
            writer: Mutex::new(()),
            loaded: AtomicBool::new(false),
            commits: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Restores the cart from durable storage. Runs once per store.
    ///
    /// ## Behavior
    /// - Record present: parsed and installed
    /// - Record absent or empty: cart stays empty
    /// - Read or parse failure: under [`LoadPolicy::Lenient`] logged and
    ///   reported as [`LoadOutcome::Discarded`]; under
    ///   [`LoadPolicy::Strict`] returned as an error
    pub async fn load(&self) -> CartResult<LoadOutcome> {
        let _writer = self.writer.lock().await;

        if self.loaded.load(Ordering::SeqCst) {
            debug!("Cart already loaded");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        // A strict failure leaves the store unloaded so load can be retried.
        let outcome = self.restore().await?;
        self.loaded.store(true, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn restore(&self) -> CartResult<LoadOutcome> {
        info!(key = %self.storage_key, "Loading cart from storage");

        let record = match self.storage.get(&self.storage_key).await {
            Ok(record) => record,
            Err(err) => return self.discard(CartError::Storage(err)),
        };

        let record = match record {
            Some(record) if !record.is_empty() => record,
            _ => {
                info!("No stored cart, starting empty");
                return Ok(LoadOutcome::Empty);
            }
        };

        let restored = match codec::decode(&record) {
            Ok(cart) => cart,
            Err(err) => return self.discard(CartError::Record(err)),
        };

        if self.commits.load(Ordering::SeqCst) > 0 {
            warn!("Cart changed before load finished; keeping in-memory cart");
            return Ok(LoadOutcome::Superseded);
        }

        let items = restored.len();
        self.install(restored);
        info!(items, "Cart restored from storage");

        Ok(LoadOutcome::Restored { items })
    }

    fn discard(&self, err: CartError) -> CartResult<LoadOutcome> {
        match self.policy {
            LoadPolicy::Strict => {
                error!(error = %err, "Failed to load stored cart");
                Err(err)
            }
            LoadPolicy::Lenient => {
                warn!(error = %err, "Stored cart unusable, starting empty");
                Ok(LoadOutcome::Discarded {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Checks whether [`CartStore::load`] has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// Returns the current items in cart order.
    pub fn products(&self) -> Vec<LineItem> {
        self.cart().into_items()
    }

    /// Returns a snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `candidate`.
    ///
    /// An existing item only gains a unit; its stored title, image and price
    /// are kept.
    ///
    /// ## Errors
    /// [`CartError::InvalidProduct`] when the price is NaN or infinite. The
    /// cart and the stored record are left untouched.
    pub async fn add_to_cart(&self, candidate: &NewLineItem) -> CartResult<Cart> {
        debug!(id = %candidate.id, "add_to_cart");
        candidate.validate().map_err(CartError::InvalidProduct)?;
        self.commit(|cart| cart.with_added(candidate)).await
    }

    /// Adds one unit to the item with `id`. Unknown ids change nothing.
    pub async fn increment(&self, id: &str) -> CartResult<Cart> {
        debug!(id = %id, "increment");
        self.commit(|cart| cart.with_incremented(id)).await
    }

    /// Removes one unit from the item with `id`, stopping at zero.
    pub async fn decrement(&self, id: &str) -> CartResult<Cart> {
        debug!(id = %id, "decrement");
        self.commit(|cart| cart.with_decremented(id)).await
    }

    async fn commit(&self, rule: impl FnOnce(&Cart) -> Cart) -> CartResult<Cart> {
        let _writer = self.writer.lock().await;

        let next = rule(&self.cart());
        self.install(next.clone());
        self.commits.fetch_add(1, Ordering::SeqCst);

        if let Err(err) = self.persist(&next).await {
            error!(error = %err, "Failed to persist cart; keeping in-memory state");
            return Err(err);
        }

        Ok(next)
    }

    fn install(&self, cart: Cart) {
        *self.cart.write().unwrap_or_else(PoisonError::into_inner) = cart;
    }

    async fn persist(&self, cart: &Cart) -> CartResult<()> {
        let record = codec::encode(cart)?;

        self.storage.remove(&self.clear_key).await?;
        self.storage.set(&self.storage_key, &record).await?;

        debug!(items = cart.len(), key = %self.storage_key, "Cart persisted");
        Ok(())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("clear_key", &self.clear_key)
            .field("policy", &self.policy)
            .field("cart", &self.cart())
            .finish_non_exhaustive()
    }
}
