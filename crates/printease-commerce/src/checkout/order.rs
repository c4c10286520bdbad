//! Order requests and the submission port.

use std::collections::VecDeque;

use crate::cart::{Cart, CartTotals, ShippingPolicy};
use crate::checkout::{CustomerDetails, PaymentMethod};
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Snapshot of one cart row at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

/// Everything the shop needs to fulfil an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub order_id: OrderId,
    /// `None` when the storefront does not collect details.
    pub customer: Option<CustomerDetails>,
    pub payment: PaymentMethod,
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
}

impl OrderRequest {
    /// Freeze the cart into an order with a fresh order number.
    pub fn from_cart(
        cart: &Cart,
        shipping: &ShippingPolicy,
        payment: PaymentMethod,
        customer: Option<CustomerDetails>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCartCheckout);
        }

        let lines = cart
            .items
            .iter()
            .map(|item| {
                Ok(OrderLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(Self {
            order_id: OrderId::generate(),
            customer,
            payment,
            lines,
            totals: cart.calculate_totals(shipping)?,
        })
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// How a submission settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionResult {
    Accepted,
    Rejected(String),
    TimedOut,
}

/// Where orders go once checkout is confirmed.
pub trait OrderSubmitter {
    fn submit(&mut self, order: &OrderRequest) -> SubmissionResult;
}

impl<O: OrderSubmitter + ?Sized> OrderSubmitter for Box<O> {
    fn submit(&mut self, order: &OrderRequest) -> SubmissionResult {
        (**self).submit(order)
    }
}

/// Stand-in for an order backend.
///
/// Accepts everything unless outcomes were queued with
/// [`SimulatedSubmitter::then`]; queued outcomes are used first, in order.
#[derive(Debug, Default)]
pub struct SimulatedSubmitter {
    script: VecDeque<SubmissionResult>,
    received: Vec<OrderRequest>,
}

impl SimulatedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next unscripted submission.
    pub fn then(mut self, result: SubmissionResult) -> Self {
        self.script.push_back(result);
        self
    }

    /// Orders seen so far, including rejected ones.
    pub fn received(&self) -> &[OrderRequest] {
        &self.received
    }
}

impl OrderSubmitter for SimulatedSubmitter {
    fn submit(&mut self, order: &OrderRequest) -> SubmissionResult {
        let result = self.script.pop_front().unwrap_or(SubmissionResult::Accepted);
        tracing::info!(
            order_id = %order.order_id,
            payment = order.payment.token(),
            total = %order.totals.total,
            result = ?result,
            "simulated order submission"
        );
        self.received.push(order.clone());
        result
    }
}
