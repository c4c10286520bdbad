//! Storage-backed cart manager.

use printease_store::{Store, StoreError, StoreExt};
use serde::Serialize;

use crate::cart::record::{self, LineItemRecord};
use crate::cart::{AddOutcome, Cart, CartTotals, LineItem, ProductCandidate, QuantityChange, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::notify::{Notification, Notifier};
use crate::settings::CommerceSettings;

/// Everything a renderer needs after a mutation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub item_count: i64,
}

/// Owns the in-memory cart and keeps it in step with a [`Store`].
///
/// Each mutation builds the next cart state, writes it, and only then
/// replaces the in-memory cart. A failed write leaves memory and storage
/// both at the previous state and surfaces `StorageUnavailable`.
#[derive(Debug)]
pub struct CartManager<S, N> {
    store: S,
    notifier: N,
    storage_key: String,
    shipping: ShippingPolicy,
    cart: Cart,
}

impl<S: Store, N: Notifier> CartManager<S, N> {
    /// Load the persisted cart and take ownership of the store.
    pub fn open(store: S, notifier: N, settings: &CommerceSettings) -> Self {
        let cart = load_cart(&store, &settings.storage_key, settings.currency);
        Self {
            store,
            notifier,
            storage_key: settings.storage_key.clone(),
            shipping: settings.shipping_policy(),
            cart,
        }
    }

    /// Re-read the cart from storage, discarding the in-memory copy.
    pub fn reload(&mut self) -> &Cart {
        self.cart = load_cart(&self.store, &self.storage_key, self.cart.currency);
        &self.cart
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product, merging with an existing row.
    pub fn add_item(&mut self, candidate: ProductCandidate) -> Result<AddOutcome, CommerceError> {
        let name = candidate.name.clone();
        let mut next = self.cart.clone();
        let outcome = next.add_item(candidate).map_err(|e| self.report(e))?;
        self.commit(next)?;

        match outcome {
            AddOutcome::Added => {
                self.notifier
                    .notify(Notification::success(format!("{} added to cart!", name)));
            }
            AddOutcome::Updated { .. } => {
                self.notifier
                    .notify(Notification::info(format!("{} quantity updated in cart.", name)));
            }
        }
        Ok(outcome)
    }

    /// Add `delta` to a row's quantity; zero or below removes the row.
    ///
    /// An unknown id is a no-op and touches neither storage nor notifications.
    pub fn change_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let mut next = self.cart.clone();
        let change = next.change_quantity(id, delta).map_err(|e| self.report(e))?;

        match change {
            QuantityChange::NotFound => {
                tracing::debug!(id = %id, "quantity change for unknown item ignored");
            }
            QuantityChange::Removed => {
                self.commit(next)?;
                self.notifier
                    .notify(Notification::success("Item removed from cart"));
            }
            QuantityChange::Updated { quantity } => {
                self.commit(next)?;
                tracing::debug!(id = %id, quantity, "quantity updated");
            }
        }
        Ok(change)
    }

    /// Remove a row. Returns `false` (and does nothing) if it was absent.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        let mut next = self.cart.clone();
        if !next.remove_item(id) {
            tracing::debug!(id = %id, "remove for unknown item ignored");
            return Ok(false);
        }
        self.commit(next)?;
        self.notifier
            .notify(Notification::success("Item removed from cart"));
        Ok(true)
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.commit(Cart::new(self.cart.currency))
    }

    /// Subtotal, shipping fee and total.
    pub fn compute_totals(&self) -> Result<CartTotals, CommerceError> {
        self.cart.calculate_totals(&self.shipping)
    }

    /// Sum of all quantities, for the cart badge.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Items, totals and count in one value.
    pub fn snapshot(&self) -> Result<CartSnapshot, CommerceError> {
        Ok(CartSnapshot {
            items: self.cart.items.clone(),
            totals: self.compute_totals()?,
            item_count: self.item_count(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Give back the store and notifier.
    pub fn into_parts(self) -> (S, N) {
        (self.store, self.notifier)
    }

    fn commit(&mut self, next: Cart) -> Result<(), CommerceError> {
        let records = record::encode(&next);
        if let Err(e) = self.store.set_json(&self.storage_key, &records) {
            let err = CommerceError::StorageUnavailable(e.to_string());
            tracing::error!(key = %self.storage_key, error = %e, "failed to persist cart");
            self.notifier.notify(Notification::error(
                "Could not save your cart. Please try again.",
            ));
            return Err(err);
        }

        tracing::debug!(
            key = %self.storage_key,
            rows = next.items.len(),
            item_count = next.item_count(),
            "cart persisted"
        );
        self.cart = next;
        Ok(())
    }

    fn report(&mut self, err: CommerceError) -> CommerceError {
        self.notifier.notify(Notification::error(err.to_string()));
        err
    }
}

/// Read the persisted cart.
///
/// Never fails: a missing key, an unreadable store or a malformed blob all
/// yield an empty cart.
pub fn load_cart<S: Store + ?Sized>(store: &S, key: &str, currency: Currency) -> Cart {
    match store.get_json::<Vec<LineItemRecord>>(key) {
        Ok(Some(records)) => {
            let (cart, report) = record::decode(records, currency);
            if report.dropped > 0 || report.merged > 0 {
                tracing::warn!(
                    key,
                    dropped = report.dropped,
                    merged = report.merged,
                    "repaired persisted cart"
                );
            }
            tracing::debug!(key, rows = cart.items.len(), "cart loaded");
            cart
        }
        Ok(None) => Cart::new(currency),
        Err(StoreError::Serialize(e)) => {
            let err = CommerceError::MalformedPersistedState(e.to_string());
            tracing::warn!(key, error = %err, "ignoring malformed cart");
            Cart::new(currency)
        }
        Err(e) => {
            let err = CommerceError::StorageUnavailable(e.to_string());
            tracing::warn!(key, error = %err, "cart storage unreadable, starting empty");
            Cart::new(currency)
        }
    }
}
