//! Storefront session.
//!
//! [`StorefrontSession`] is what a UI binds to. It owns the cart manager,
//! the checkout flow, the order submitter and a [`TimerQueue`], and exposes
//! one method per shopper action. Delayed effects (notification dismissal,
//! order settlement, the post-checkout redirect, form acknowledgements) only
//! happen when the caller moves time forward with
//! [`StorefrontSession::advance`], which makes the whole session
//! deterministic under test.

use std::time::Duration;

use printease_store::Store;

use crate::cart::{AddOutcome, Cart, CartManager, CartSnapshot, ProductCandidate, QuantityChange};
use crate::checkout::{
    CheckoutFlow, CheckoutState, CustomerDetails, OrderRequest, OrderSubmitter, PaymentMethod,
    SimulatedSubmitter, SubmissionResult,
};
use crate::forms::{self, ContactForm, DesignRequest};
use crate::ids::{OrderId, ProductId};
use crate::notify::{Notification, NotificationCenter, NotificationId, Notifier};
use crate::settings::CommerceSettings;
use crate::timer::TimerQueue;
use crate::CommerceError;

pub const SUBMISSION_TIMED_OUT: &str = "Order submission timed out. Please try again.";

/// Something the UI has to act on, produced by [`StorefrontSession::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    /// The order was accepted and the cart emptied.
    OrderPlaced(OrderId),
    /// Leave the checkout page for the landing page.
    RedirectToLanding,
    /// The contact form was delivered.
    ContactSent,
    /// The design request was delivered.
    DesignRequestSent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionEvent {
    Dismiss(NotificationId),
    SettleOrder,
    Redirect,
    ContactAcknowledged,
    DesignAcknowledged,
    DesignFormReset,
}

/// One shopper's storefront state.
pub struct StorefrontSession<S, O = SimulatedSubmitter> {
    cart: CartManager<S, NotificationCenter>,
    checkout: CheckoutFlow,
    submitter: O,
    timers: TimerQueue<SessionEvent>,
    settings: CommerceSettings,
    contact_pending: bool,
    design_pending: bool,
}

impl<S: Store> StorefrontSession<S, SimulatedSubmitter> {
    /// Session with a submitter that accepts every order.
    pub fn simulated(store: S, settings: CommerceSettings) -> Result<Self, CommerceError> {
        Self::new(store, SimulatedSubmitter::new(), settings)
    }
}

impl<S: Store, O: OrderSubmitter> StorefrontSession<S, O> {
    /// Load the cart from `store` and start a session at virtual time zero.
    pub fn new(store: S, submitter: O, settings: CommerceSettings) -> Result<Self, CommerceError> {
        settings.validate()?;
        let cart = CartManager::open(store, NotificationCenter::new(), &settings);
        tracing::debug!(
            items = cart.item_count(),
            key = %settings.storage_key,
            "storefront session started"
        );
        Ok(Self {
            cart,
            checkout: CheckoutFlow::new(&settings),
            submitter,
            timers: TimerQueue::new(),
            settings,
            contact_pending: false,
            design_pending: false,
        })
    }

    // ---- cart ----

    pub fn add_to_cart(&mut self, candidate: ProductCandidate) -> Result<AddOutcome, CommerceError> {
        self.ensure_cart_editable()?;
        let result = self.cart.add_item(candidate);
        self.schedule_dismissals();
        result
    }

    pub fn change_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        self.ensure_cart_editable()?;
        let result = self.cart.change_quantity(id, delta);
        self.schedule_dismissals();
        result
    }

    pub fn remove_item(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.ensure_cart_editable()?;
        let result = self.cart.remove_item(id);
        self.schedule_dismissals();
        result
    }

    pub fn clear_cart(&mut self) -> Result<(), CommerceError> {
        self.ensure_cart_editable()?;
        let result = self.cart.clear();
        self.schedule_dismissals();
        result
    }

    /// The cart is frozen while an order built from it is in flight.
    fn ensure_cart_editable(&self) -> Result<(), CommerceError> {
        if matches!(self.checkout.state(), CheckoutState::Submitting { .. }) {
            return Err(CommerceError::SubmissionInProgress);
        }
        Ok(())
    }

    // ---- checkout ----

    pub fn open_checkout(&mut self) -> Result<(), CommerceError> {
        let result = self.checkout.open(self.cart.cart());
        self.report(result)
    }

    pub fn close_checkout(&mut self) -> Result<(), CommerceError> {
        let result = self.checkout.close();
        self.report(result)
    }

    /// Validate the checkout form and queue the order for settlement.
    ///
    /// The order settles after the configured submission latency, on a
    /// later [`advance`](Self::advance).
    pub fn submit_checkout(
        &mut self,
        payment: Option<PaymentMethod>,
        customer: Option<CustomerDetails>,
    ) -> Result<OrderId, CommerceError> {
        let result = self.checkout.submit(self.cart.cart(), payment, customer);
        let order = self.report(result)?;
        self.timers
            .schedule(self.settings.submission_latency(), SessionEvent::SettleOrder);
        Ok(order.order_id)
    }

    /// Back to the payment form after a failed attempt.
    pub fn resume_checkout(&mut self) -> Result<(), CommerceError> {
        let result = self.checkout.resume();
        self.report(result)
    }

    // ---- forms ----

    pub fn submit_contact(&mut self, form: &ContactForm) -> Result<(), CommerceError> {
        if self.contact_pending {
            return Err(CommerceError::SubmissionInProgress);
        }
        self.report(form.validate())?;

        tracing::info!(subject = %form.subject.trim(), "contact form accepted");
        self.contact_pending = true;
        self.post(Notification::info(forms::CONTACT_SENDING));
        self.timers
            .schedule(self.settings.form_latency(), SessionEvent::ContactAcknowledged);
        Ok(())
    }

    pub fn submit_design(&mut self, request: &DesignRequest) -> Result<(), CommerceError> {
        if self.design_pending {
            return Err(CommerceError::SubmissionInProgress);
        }
        self.report(request.validate(self.settings.max_design_file_bytes))?;

        tracing::info!(
            item_type = %request.item_type.trim(),
            quantity = request.quantity,
            "design request accepted"
        );
        self.design_pending = true;
        self.post(Notification::info(forms::DESIGN_PROCESSING));
        self.timers
            .schedule(self.settings.form_latency(), SessionEvent::DesignAcknowledged);
        Ok(())
    }

    // ---- time ----

    /// Move virtual time forward and apply everything that came due.
    ///
    /// Timers scheduled while handling an event fire in the same call if
    /// their deadline falls inside the window.
    pub fn advance(&mut self, by: Duration) -> Vec<SessionSignal> {
        let target = self.timers.now().saturating_add(by);
        let mut signals = Vec::new();

        while let Some(deadline) = self.timers.next_deadline().filter(|d| *d <= target) {
            let step = deadline.saturating_sub(self.timers.now());
            for event in self.timers.advance(step) {
                self.handle(event, &mut signals);
            }
        }

        let rest = target.saturating_sub(self.timers.now());
        self.timers.advance(rest);
        signals
    }

    /// Time until the next pending timer, if any.
    pub fn time_until_next_event(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // ---- views ----

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn snapshot(&self) -> Result<CartSnapshot, CommerceError> {
        self.cart.snapshot()
    }

    /// Visible notifications, oldest first.
    pub fn notifications(&self) -> &[(NotificationId, Notification)] {
        self.cart.notifier().visible()
    }

    pub fn checkout_state(&self) -> &CheckoutState {
        self.checkout.state()
    }

    pub fn pending_order(&self) -> Option<&OrderRequest> {
        self.checkout.pending_order()
    }

    pub fn settings(&self) -> &CommerceSettings {
        &self.settings
    }

    pub fn submitter(&self) -> &O {
        &self.submitter
    }

    pub fn store(&self) -> &S {
        self.cart.store()
    }

    pub fn into_store(self) -> S {
        self.cart.into_parts().0
    }

    fn handle(&mut self, event: SessionEvent, signals: &mut Vec<SessionSignal>) {
        match event {
            SessionEvent::Dismiss(id) => {
                self.cart.notifier_mut().dismiss(id);
            }
            SessionEvent::SettleOrder => self.settle_order(signals),
            SessionEvent::Redirect => signals.push(SessionSignal::RedirectToLanding),
            SessionEvent::ContactAcknowledged => {
                self.contact_pending = false;
                self.post(Notification::success(forms::CONTACT_SENT));
                signals.push(SessionSignal::ContactSent);
            }
            SessionEvent::DesignAcknowledged => {
                self.post(Notification::success(forms::DESIGN_SENT));
                signals.push(SessionSignal::DesignRequestSent);
                // The form stays locked while the confirmation is on screen.
                self.timers
                    .schedule(self.settings.notification_dismiss(), SessionEvent::DesignFormReset);
            }
            SessionEvent::DesignFormReset => self.design_pending = false,
        }
    }

    fn settle_order(&mut self, signals: &mut Vec<SessionSignal>) {
        let Some(order) = self.checkout.pending_order().cloned() else {
            tracing::warn!("settle fired with no pending order");
            return;
        };

        let outcome = match self.submitter.submit(&order) {
            SubmissionResult::Accepted => match self.cart.clear() {
                Ok(()) => self.checkout.complete().map(|order_id| {
                    signals.push(SessionSignal::OrderPlaced(order_id));
                    self.timers
                        .schedule(self.settings.redirect_delay(), SessionEvent::Redirect);
                }),
                // The cart manager has already told the shopper.
                Err(err) => self.checkout.fail(err.to_string()),
            },
            SubmissionResult::Rejected(reason) => {
                self.post(Notification::error(reason.clone()));
                self.checkout.fail(reason)
            }
            SubmissionResult::TimedOut => {
                self.post(Notification::error(SUBMISSION_TIMED_OUT));
                self.checkout.fail(SUBMISSION_TIMED_OUT)
            }
        };

        if let Err(err) = outcome {
            tracing::error!(order_id = %order.order_id, error = %err, "failed to settle order");
        }
        self.schedule_dismissals();
    }

    /// Surface an error as a notification. A rejected double submit stays
    /// silent since the control is disabled.
    fn report<T>(&mut self, result: Result<T, CommerceError>) -> Result<T, CommerceError> {
        if let Err(err) = &result {
            if !matches!(err, CommerceError::SubmissionInProgress) {
                self.cart.notifier_mut().notify(Notification::error(err.to_string()));
            }
        }
        self.schedule_dismissals();
        result
    }

    fn post(&mut self, notification: Notification) {
        self.cart.notifier_mut().notify(notification);
        self.schedule_dismissals();
    }

    fn schedule_dismissals(&mut self) {
        let delay = self.settings.notification_dismiss();
        for id in self.cart.notifier_mut().take_fresh() {
            self.timers.schedule(delay, SessionEvent::Dismiss(id));
        }
    }
}
