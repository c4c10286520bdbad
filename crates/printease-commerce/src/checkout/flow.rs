//! Checkout flow state machine.
//!
//! ```text
//! Idle --open--> AwaitingPayment --submit--> Submitting --accepted--> Success
//!  ^                |      ^                     |
//!  +-----close------+      +--resume-- ValidationFailed <--rejected--+
//! ```
//!
//! The flow only tracks state. Settling a submission (calling the order
//! backend, clearing the cart) is driven by the storefront session, which
//! reports the outcome back through [`CheckoutFlow::complete`] or
//! [`CheckoutFlow::fail`].

use crate::cart::{Cart, ShippingPolicy};
use crate::checkout::customer::MISSING_DETAILS_MESSAGE;
use crate::checkout::{CustomerDetails, OrderRequest, PaymentMethod};
use crate::ids::OrderId;
use crate::settings::CommerceSettings;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

pub const MISSING_PAYMENT_MESSAGE: &str = "Please select a payment method.";

/// Where the shopper is in checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Modal closed.
    Idle,
    /// Modal open, waiting for payment selection.
    AwaitingPayment,
    /// Order handed off; the submit control is disabled.
    Submitting { order_id: OrderId },
    /// Order accepted and cart cleared.
    Success { order_id: OrderId },
    /// Last attempt failed; the shopper can correct and retry.
    ValidationFailed { reason: String },
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::AwaitingPayment => "awaiting_payment",
            CheckoutState::Submitting { .. } => "submitting",
            CheckoutState::Success { .. } => "success",
            CheckoutState::ValidationFailed { .. } => "validation_failed",
        }
    }

    /// Whether the checkout modal is showing.
    pub fn is_open(&self) -> bool {
        !matches!(self, CheckoutState::Idle)
    }

    /// Whether the submit control accepts input.
    pub fn accepts_submission(&self) -> bool {
        matches!(
            self,
            CheckoutState::AwaitingPayment | CheckoutState::ValidationFailed { .. }
        )
    }
}

/// Checkout state plus the order being submitted.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    shipping: ShippingPolicy,
    require_customer_details: bool,
    pending: Option<OrderRequest>,
}

impl CheckoutFlow {
    pub fn new(settings: &CommerceSettings) -> Self {
        Self {
            state: CheckoutState::Idle,
            shipping: settings.shipping_policy(),
            require_customer_details: settings.require_customer_details,
            pending: None,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Order awaiting settlement, while `Submitting`.
    pub fn pending_order(&self) -> Option<&OrderRequest> {
        self.pending.as_ref()
    }

    /// Open checkout for a non-empty cart.
    ///
    /// Reopening an already open checkout is a no-op.
    pub fn open(&mut self, cart: &Cart) -> Result<(), CommerceError> {
        match &self.state {
            CheckoutState::Idle => {
                if cart.is_empty() {
                    tracing::info!("checkout refused: cart is empty");
                    return Err(CommerceError::EmptyCartCheckout);
                }
                self.transition(CheckoutState::AwaitingPayment);
                Ok(())
            }
            CheckoutState::AwaitingPayment | CheckoutState::ValidationFailed { .. } => Ok(()),
            CheckoutState::Submitting { .. } => Err(CommerceError::SubmissionInProgress),
            CheckoutState::Success { .. } => Err(self.invalid("awaiting_payment")),
        }
    }

    /// Close the modal without submitting.
    pub fn close(&mut self) -> Result<(), CommerceError> {
        match &self.state {
            CheckoutState::Idle => Ok(()),
            CheckoutState::AwaitingPayment | CheckoutState::ValidationFailed { .. } => {
                self.transition(CheckoutState::Idle);
                Ok(())
            }
            CheckoutState::Submitting { .. } => Err(CommerceError::SubmissionInProgress),
            CheckoutState::Success { .. } => Err(self.invalid("idle")),
        }
    }

    /// Validate the form and hand the order off.
    ///
    /// On a validation failure the flow moves to `ValidationFailed` with the
    /// reason and the cart is left alone. A submission while another one is
    /// pending is rejected without changing state.
    pub fn submit(
        &mut self,
        cart: &Cart,
        payment: Option<PaymentMethod>,
        customer: Option<CustomerDetails>,
    ) -> Result<OrderRequest, CommerceError> {
        match &self.state {
            CheckoutState::AwaitingPayment | CheckoutState::ValidationFailed { .. } => {}
            CheckoutState::Submitting { .. } => return Err(CommerceError::SubmissionInProgress),
            CheckoutState::Idle | CheckoutState::Success { .. } => {
                return Err(self.invalid("submitting"))
            }
        }

        match self.build_order(cart, payment, customer) {
            Ok(order) => {
                self.transition(CheckoutState::Submitting {
                    order_id: order.order_id.clone(),
                });
                self.pending = Some(order.clone());
                Ok(order)
            }
            // Nothing to buy: the form stays as it was.
            Err(err @ CommerceError::EmptyCartCheckout) => Err(err),
            Err(err) => {
                self.transition(CheckoutState::ValidationFailed {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// The submitted order was accepted and the cart has been cleared.
    pub fn complete(&mut self) -> Result<OrderId, CommerceError> {
        let CheckoutState::Submitting { order_id } = &self.state else {
            return Err(self.invalid("success"));
        };
        let order_id = order_id.clone();
        self.pending = None;
        self.transition(CheckoutState::Success {
            order_id: order_id.clone(),
        });
        Ok(order_id)
    }

    /// The submitted order did not go through.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), CommerceError> {
        if !matches!(self.state, CheckoutState::Submitting { .. }) {
            return Err(self.invalid("validation_failed"));
        }
        self.pending = None;
        self.transition(CheckoutState::ValidationFailed {
            reason: reason.into(),
        });
        Ok(())
    }

    /// Go back to the form after a failure.
    pub fn resume(&mut self) -> Result<(), CommerceError> {
        if !matches!(self.state, CheckoutState::ValidationFailed { .. }) {
            return Err(self.invalid("awaiting_payment"));
        }
        self.transition(CheckoutState::AwaitingPayment);
        Ok(())
    }

    fn build_order(
        &self,
        cart: &Cart,
        payment: Option<PaymentMethod>,
        customer: Option<CustomerDetails>,
    ) -> Result<OrderRequest, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCartCheckout);
        }
        let payment = payment
            .ok_or_else(|| CommerceError::Validation(MISSING_PAYMENT_MESSAGE.to_string()))?;

        let customer = customer.map(|c| c.trimmed());
        if self.require_customer_details {
            match &customer {
                Some(details) => details.validate()?,
                None => {
                    return Err(CommerceError::Validation(MISSING_DETAILS_MESSAGE.to_string()))
                }
            }
        }

        OrderRequest::from_cart(cart, &self.shipping, payment, customer)
    }

    fn transition(&mut self, next: CheckoutState) {
        tracing::info!(from = self.state.as_str(), to = next.as_str(), "checkout transition");
        self.state = next;
    }

    fn invalid(&self, to: &str) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.state.as_str().to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductCandidate;
    use crate::money::{Currency, Money};

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new(Currency::PHP);
        cart.add_item(ProductCandidate::new(
            "tee",
            "Printed Tee",
            Money::new(25000, Currency::PHP),
            "tee.png",
        ))
        .unwrap();
        cart
    }

    fn customer() -> CustomerDetails {
        CustomerDetails::new("Maria Santos", "maria@example.ph", "09181234567", "Makati")
    }

    fn relaxed() -> CheckoutFlow {
        CheckoutFlow::new(&CommerceSettings {
            require_customer_details: false,
            ..CommerceSettings::default()
        })
    }

    #[test]
    fn test_cannot_open_with_empty_cart() {
        let mut flow = CheckoutFlow::new(&CommerceSettings::default());
        let err = flow.open(&Cart::default()).unwrap_err();

        assert!(matches!(err, CommerceError::EmptyCartCheckout));
        assert_eq!(err.to_string(), "Your cart is empty.");
        assert_eq!(flow.state(), &CheckoutState::Idle);
    }

    #[test]
    fn test_open_and_close() {
        let mut flow = CheckoutFlow::new(&CommerceSettings::default());
        flow.open(&cart_with_items()).unwrap();
        assert_eq!(flow.state(), &CheckoutState::AwaitingPayment);
        assert!(flow.state().is_open());

        flow.close().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Idle);
    }

    #[test]
    fn test_missing_payment_fails_validation() {
        let mut flow = relaxed();
        let cart = cart_with_items();
        flow.open(&cart).unwrap();

        let err = flow.submit(&cart, None, None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_PAYMENT_MESSAGE);
        assert_eq!(
            flow.state(),
            &CheckoutState::ValidationFailed {
                reason: MISSING_PAYMENT_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_submit_with_emptied_cart_keeps_state() {
        let mut flow = relaxed();
        flow.open(&cart_with_items()).unwrap();

        let err = flow
            .submit(&Cart::default(), Some(PaymentMethod::CashOnDelivery), None)
            .unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCartCheckout));
        assert_eq!(flow.state(), &CheckoutState::AwaitingPayment);
        assert!(flow.pending_order().is_none());
    }

    #[test]
    fn test_customer_details_required_by_default() {
        let mut flow = CheckoutFlow::new(&CommerceSettings::default());
        let cart = cart_with_items();
        flow.open(&cart).unwrap();

        assert!(flow.submit(&cart, Some(PaymentMethod::GCash), None).is_err());

        let bad_email = CustomerDetails {
            email: "maria".to_string(),
            ..customer()
        };
        assert!(flow
            .submit(&cart, Some(PaymentMethod::GCash), Some(bad_email))
            .is_err());

        let order = flow
            .submit(&cart, Some(PaymentMethod::GCash), Some(customer()))
            .unwrap();
        assert_eq!(order.customer, Some(customer()));
        assert!(matches!(flow.state(), CheckoutState::Submitting { .. }));
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut flow = relaxed();
        let cart = cart_with_items();
        flow.open(&cart).unwrap();
        let order = flow.submit(&cart, Some(PaymentMethod::CashOnDelivery), None).unwrap();

        let err = flow
            .submit(&cart, Some(PaymentMethod::CashOnDelivery), None)
            .unwrap_err();
        assert!(matches!(err, CommerceError::SubmissionInProgress));
        assert_eq!(flow.pending_order(), Some(&order));
        assert!(flow.close().is_err());
    }

    #[test]
    fn test_complete() {
        let mut flow = relaxed();
        let cart = cart_with_items();
        flow.open(&cart).unwrap();
        let order = flow.submit(&cart, Some(PaymentMethod::PayMaya), None).unwrap();

        assert_eq!(flow.complete().unwrap(), order.order_id);
        assert_eq!(
            flow.state(),
            &CheckoutState::Success {
                order_id: order.order_id
            }
        );
        assert!(flow.pending_order().is_none());

        // Terminal.
        assert!(flow.open(&cart).is_err());
        assert!(flow.close().is_err());
        assert!(flow.submit(&cart, Some(PaymentMethod::PayMaya), None).is_err());
    }

    #[test]
    fn test_fail_then_resume_and_retry() {
        let mut flow = relaxed();
        let cart = cart_with_items();
        flow.open(&cart).unwrap();
        flow.submit(&cart, Some(PaymentMethod::BankTransfer), None).unwrap();

        flow.fail("Payment declined").unwrap();
        assert!(flow.state().accepts_submission());

        flow.resume().unwrap();
        assert_eq!(flow.state(), &CheckoutState::AwaitingPayment);
        assert!(flow.submit(&cart, Some(PaymentMethod::BankTransfer), None).is_ok());
    }

    #[test]
    fn test_retry_directly_from_failure() {
        let mut flow = relaxed();
        let cart = cart_with_items();
        flow.open(&cart).unwrap();
        assert!(flow.submit(&cart, None, None).is_err());
        assert!(flow.submit(&cart, Some(PaymentMethod::GCash), None).is_ok());
    }

    #[test]
    fn test_out_of_order_calls() {
        let mut flow = relaxed();
        assert!(matches!(
            flow.submit(&cart_with_items(), Some(PaymentMethod::GCash), None),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(flow.complete().is_err());
        assert!(flow.fail("nope").is_err());
        assert!(flow.resume().is_err());
        assert!(flow.close().is_ok());
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(CheckoutState::ValidationFailed {
            reason: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "validation_failed");
        assert_eq!(json["reason"], "x");
    }
}
