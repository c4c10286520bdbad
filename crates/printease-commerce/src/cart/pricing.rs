//! Cart totals and shipping policy.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How shipping is charged for an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Flat fee charged once per non-empty order.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    /// Charge `flat_fee` once whenever the subtotal is positive.
    pub fn flat(flat_fee: Money) -> Self {
        Self { flat_fee }
    }

    /// Shipping fee for a given subtotal.
    ///
    /// Zero for an empty (zero-subtotal) cart.
    pub fn fee_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        if self.flat_fee.currency != subtotal.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: self.flat_fee.currency.code().to_string(),
            });
        }
        if subtotal.is_positive() {
            Ok(self.flat_fee)
        } else {
            Ok(Money::zero(subtotal.currency))
        }
    }
}

/// Totals shown in the cart summary and the checkout overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Shipping fee.
    pub shipping_fee: Money,
    /// Subtotal plus shipping.
    pub total: Money,
    /// Per-row breakdown.
    pub line_items: Vec<LineItemTotal>,
}

impl CartTotals {
    /// Check if shipping is being charged.
    pub fn has_shipping(&self) -> bool {
        self.shipping_fee.is_positive()
    }
}

/// Total for a single row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemTotal {
    /// Product id.
    pub id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Unit price times quantity.
    pub total: Money,
}
