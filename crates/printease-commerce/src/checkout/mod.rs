//! Checkout module.
//!
//! Contains the checkout state machine, payment methods, customer details,
//! order requests and the order submission port.

mod customer;
mod flow;
mod order;
mod payment;

pub use customer::{is_valid_email, CustomerDetails, INVALID_EMAIL_MESSAGE, MISSING_DETAILS_MESSAGE};
pub use flow::{CheckoutFlow, CheckoutState, MISSING_PAYMENT_MESSAGE};
pub use order::{OrderLine, OrderRequest, OrderSubmitter, SimulatedSubmitter, SubmissionResult};
pub use payment::PaymentMethod;
