//! Payment methods offered at checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CommerceError;

/// How the shopper intends to pay. No payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    CashOnDelivery,
    /// GCash e-wallet.
    GCash,
    /// PayMaya e-wallet.
    PayMaya,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::GCash,
        PaymentMethod::PayMaya,
        PaymentMethod::BankTransfer,
    ];

    /// Form token, as used by the checkout radio buttons.
    pub fn token(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::GCash => "gcash",
            PaymentMethod::PayMaya => "paymaya",
            PaymentMethod::BankTransfer => "bank",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::GCash => "GCash",
            PaymentMethod::PayMaya => "PayMaya",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    /// Parse a form token, ignoring case and surrounding whitespace.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.token().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            CommerceError::Validation(format!(
                "Unknown payment method '{}'. Expected one of: cod, gcash, paymaya, bank.",
                s.trim()
            ))
        })
    }
}
