//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// None of these are fatal to a session; every variant maps to a
/// user-facing notification.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Storage read or write failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted state could not be decoded.
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),

    /// A form or checkout field failed validation.
    #[error("{0}")]
    Validation(String),

    /// Checkout attempted with no items.
    #[error("Your cart is empty.")]
    EmptyCartCheckout,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// A submission for the same control is still pending.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Whether the caller can fix this by changing input and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CommerceError::Validation(_)
                | CommerceError::EmptyCartCheckout
                | CommerceError::SubmissionInProgress
                | CommerceError::ItemNotFound(_)
                | CommerceError::InvalidQuantity(_)
                | CommerceError::QuantityExceedsLimit(..)
        )
    }
}

impl From<printease_store::StoreError> for CommerceError {
    fn from(e: printease_store::StoreError) -> Self {
        match e {
            printease_store::StoreError::Serialize(inner) => {
                CommerceError::MalformedPersistedState(inner.to_string())
            }
            other => CommerceError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::MalformedPersistedState(e.to_string())
    }
}
