//! Persisted cart layout.
//!
//! The cart is stored as a flat JSON array of records:
//!
//! ```json
//! [{"id":"sticker","name":"Custom Sticker","price":10.0,"image":"img/sticker.png","quantity":2}]
//! ```
//!
//! Prices are decimal numbers in major units. `unitPrice` and `imageRef` are
//! accepted on read as alternative field names.

use crate::cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM, MAX_UNIT_PRICE_CENTS};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One persisted cart row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "unitPrice")]
    pub price: f64,
    #[serde(alias = "imageRef", default)]
    pub image: String,
    pub quantity: i64,
}

impl LineItemRecord {
    /// Build the record for a cart row.
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            name: item.name.clone(),
            price: item.unit_price.to_decimal(),
            image: item.image_ref.clone(),
            quantity: item.quantity,
        }
    }

    fn is_usable(&self) -> bool {
        !self.id.trim().is_empty()
            && self.quantity > 0
            && self.price.is_finite()
            && self.price >= 0.0
    }
}

/// What happened while rebuilding a cart from records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DecodeReport {
    /// Rows skipped for an empty id, non-positive quantity or a price that is
    /// negative, non-finite or too large.
    pub dropped: usize,
    /// Rows folded into an earlier row with the same id.
    pub merged: usize,
}

pub(crate) fn encode(cart: &Cart) -> Vec<LineItemRecord> {
    cart.items.iter().map(LineItemRecord::from_item).collect()
}

/// Rebuild a cart, restoring the "unique id, quantity >= 1" invariants for
/// data written by older or foreign code.
pub(crate) fn decode(records: Vec<LineItemRecord>, currency: Currency) -> (Cart, DecodeReport) {
    let mut cart = Cart::new(currency);
    let mut report = DecodeReport::default();

    for record in records {
        if !record.is_usable() {
            report.dropped += 1;
            continue;
        }
        let unit_price = Money::from_decimal(record.price, currency);
        if unit_price.amount_cents > MAX_UNIT_PRICE_CENTS {
            report.dropped += 1;
            continue;
        }

        let id = ProductId::new(record.id);
        let quantity = record.quantity.min(MAX_QUANTITY_PER_ITEM);

        if let Some(existing) = cart.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            report.merged += 1;
            continue;
        }

        cart.items.push(LineItem {
            id,
            name: record.name,
            unit_price,
            image_ref: record.image,
            quantity,
        });
    }

    (cart, report)
}
