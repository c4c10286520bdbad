//! Cart and line item types.

use crate::cart::{CartTotals, LineItemTotal, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Largest unit price, in minor units, that survives the decimal persisted
/// layout exactly.
pub const MAX_UNIT_PRICE_CENTS: i64 = 999_999_999_999;

/// Product attributes captured when a shopper clicks "add to cart".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCandidate {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Artwork URL or path.
    pub image_ref: String,
}

impl ProductCandidate {
    /// Create a candidate.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

/// Result of adding a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended with quantity 1.
    Added,
    /// An existing row was incremented.
    Updated { quantity: i64 },
}

/// Result of changing a row's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The row now has this quantity.
    Updated { quantity: i64 },
    /// The quantity dropped to zero or below and the row is gone.
    Removed,
    /// No row with that id.
    NotFound,
}

/// A shopping cart: rows unique by product id, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing row with the same id is incremented instead of duplicated.
    /// Name, price and image are captured only when the row is first created.
    pub fn add_item(&mut self, candidate: ProductCandidate) -> Result<AddOutcome, CommerceError> {
        if candidate.id.as_str().trim().is_empty() {
            return Err(CommerceError::Validation(
                "Product id must not be empty.".to_string(),
            ));
        }
        if candidate.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: candidate.unit_price.currency.code().to_string(),
            });
        }
        if candidate.unit_price.is_negative() {
            return Err(CommerceError::Validation(format!(
                "Price of {} must not be negative.",
                candidate.name
            )));
        }
        if candidate.unit_price.amount_cents > MAX_UNIT_PRICE_CENTS {
            return Err(CommerceError::Validation(format!(
                "Price of {} is too large.",
                candidate.name
            )));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == candidate.id) {
            let new_quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(AddOutcome::Updated {
                quantity: new_quantity,
            });
        }

        self.items.push(LineItem::from_candidate(candidate));
        Ok(AddOutcome::Added)
    }

    /// Add `delta` to a row's quantity.
    ///
    /// A result of zero or below removes the row.
    pub fn change_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return Ok(QuantityChange::NotFound);
        };

        let new_quantity = item
            .quantity
            .checked_add(delta)
            .ok_or(CommerceError::Overflow)?;

        if new_quantity <= 0 {
            self.remove_item(id);
            return Ok(QuantityChange::Removed);
        }

        if new_quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                new_quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        item.quantity = new_quantity;
        Ok(QuantityChange::Updated {
            quantity: new_quantity,
        })
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct rows.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product id.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Get an item by product id, or `ItemNotFound`.
    pub fn require_item(&self, id: &ProductId) -> Result<&LineItem, CommerceError> {
        self.get_item(id)
            .ok_or_else(|| CommerceError::ItemNotFound(id.to_string()))
    }

    /// Compute subtotal, shipping and total in minor units.
    pub fn calculate_totals(&self, shipping: &ShippingPolicy) -> Result<CartTotals, CommerceError> {
        let mut line_items = Vec::with_capacity(self.items.len());
        let mut subtotal = Money::zero(self.currency);

        for item in &self.items {
            let total = item.line_total()?;
            subtotal = subtotal.try_add(&total).ok_or(CommerceError::Overflow)?;
            line_items.push(LineItemTotal {
                id: item.id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total,
            });
        }

        let shipping_fee = shipping.fee_for(&subtotal)?;
        let total = subtotal
            .try_add(&shipping_fee)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            subtotal,
            shipping_fee,
            total,
            line_items,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Money,
    /// Artwork reference captured at add time.
    pub image_ref: String,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    fn from_candidate(candidate: ProductCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image_ref: candidate.image_ref,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    ///
    /// Fails for a row whose quantity dropped below 1, which can only happen
    /// if the row was edited directly.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        if self.quantity < 1 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn php(amount: i64) -> Money {
        Money::new(amount * 100, Currency::PHP)
    }

    fn candidate(id: &str, price: i64) -> ProductCandidate {
        ProductCandidate::new(id, format!("Product {}", id), php(price), format!("img/{}.png", id))
    }

    #[test]
    fn test_line_total_rejects_hand_edited_quantity() {
        let mut cart = Cart::new(Currency::PHP);
        cart.add_item(candidate("x", 1)).unwrap();
        cart.items[0].quantity = 0;

        assert!(matches!(
            cart.items[0].line_total(),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_add_item_rejects_unpersistable_price() {
        let mut cart = Cart::new(Currency::PHP);
        let at_limit = Money::new(MAX_UNIT_PRICE_CENTS, Currency::PHP);
        let over_limit = Money::new(MAX_UNIT_PRICE_CENTS + 1, Currency::PHP);

        assert!(cart.add_item(ProductCandidate::new("ok", "Ok", at_limit, "")).is_ok());
        let err = cart
            .add_item(ProductCandidate::new("big", "Big", over_limit, ""))
            .unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::PHP);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        let outcome = cart.add_item(candidate("sticker", 10)).unwrap();

        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].image_ref, "img/sticker.png");
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::default();
        cart.add_item(candidate("pin", 50)).unwrap();
        let outcome = cart.add_item(candidate("pin", 50)).unwrap();

        assert_eq!(outcome, AddOutcome::Updated { quantity: 2 });
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_merge_keeps_first_captured_attributes() {
        let mut cart = Cart::default();
        cart.add_item(candidate("pin", 50)).unwrap();
        cart.add_item(ProductCandidate::new("pin", "Renamed", php(99), "other.png"))
            .unwrap();

        let item = cart.get_item(&ProductId::new("pin")).unwrap();
        assert_eq!(item.name, "Product pin");
        assert_eq!(item.unit_price, php(50));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::default();
        for id in ["c", "a", "b"] {
            cart.add_item(candidate(id, 1)).unwrap();
        }
        cart.add_item(candidate("a", 1)).unwrap();

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_change_quantity() {
        let mut cart = Cart::default();
        cart.add_item(candidate("keychain", 100)).unwrap();

        let change = cart.change_quantity(&ProductId::new("keychain"), 4).unwrap();
        assert_eq!(change, QuantityChange::Updated { quantity: 5 });
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut cart = Cart::default();
        cart.add_item(candidate("keychain", 100)).unwrap();

        let change = cart.change_quantity(&ProductId::new("keychain"), -1).unwrap();
        assert_eq!(change, QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes() {
        let mut cart = Cart::default();
        cart.add_item(candidate("keychain", 100)).unwrap();
        cart.add_item(candidate("keychain", 100)).unwrap();

        let change = cart.change_quantity(&ProductId::new("keychain"), -10).unwrap();
        assert_eq!(change, QuantityChange::Removed);
        assert!(cart.get_item(&ProductId::new("keychain")).is_none());
    }

    #[test]
    fn test_change_quantity_missing_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", 1)).unwrap();

        let change = cart.change_quantity(&ProductId::new("zzz"), 3).unwrap();
        assert_eq!(change, QuantityChange::NotFound);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", 1)).unwrap();

        assert!(cart.remove_item(&ProductId::new("a")));
        assert!(!cart.remove_item(&ProductId::new("a")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_require_item() {
        let cart = Cart::default();
        let err = cart.require_item(&ProductId::new("ghost")).unwrap_err();
        assert!(matches!(err, CommerceError::ItemNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", 1)).unwrap();
        let id = ProductId::new("a");
        cart.change_quantity(&id, MAX_QUANTITY_PER_ITEM - 1).unwrap();

        let result = cart.add_item(candidate("a", 1));
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(..))));
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);

        assert!(cart.change_quantity(&id, 1).is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut cart = Cart::default();
        let result = cart.add_item(ProductCandidate::new("a", "A", php(-1), ""));
        assert!(matches!(result, Err(CommerceError::Validation(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_rejects_foreign_currency() {
        let mut cart = Cart::new(Currency::PHP);
        let result = cart.add_item(ProductCandidate::new(
            "a",
            "A",
            Money::new(100, Currency::USD),
            "",
        ));
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", 100)).unwrap();
        cart.add_item(candidate("a", 100)).unwrap();
        cart.add_item(candidate("b", 50)).unwrap();

        let totals = cart
            .calculate_totals(&ShippingPolicy::flat(php(50)))
            .unwrap();
        assert_eq!(totals.subtotal, php(250));
        assert_eq!(totals.shipping_fee, php(50));
        assert_eq!(totals.total, php(300));
        assert_eq!(totals.line_items[0].total, php(200));
    }

    #[test]
    fn test_totals_empty_cart() {
        let cart = Cart::default();
        let totals = cart
            .calculate_totals(&ShippingPolicy::flat(php(50)))
            .unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.shipping_fee.is_zero());
        assert!(totals.total.is_zero());
    }
}
