//! Shopping cart module.
//!
//! Contains the cart, its line items, totals, the persisted record layout
//! and the storage-backed [`CartManager`].

mod cart;
mod manager;
mod pricing;
mod record;

pub use cart::{
    AddOutcome, Cart, LineItem, ProductCandidate, QuantityChange, MAX_QUANTITY_PER_ITEM,
    MAX_UNIT_PRICE_CENTS,
};
pub use manager::{load_cart, CartManager, CartSnapshot};
pub use pricing::{CartTotals, LineItemTotal, ShippingPolicy};
pub use record::LineItemRecord;
