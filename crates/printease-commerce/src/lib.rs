//! Storefront commerce logic for PrintEase.
//!
//! This crate holds everything the storefront does besides drawing pixels:
//!
//! - **Cart**: line items keyed by product id, totals with a flat shipping
//!   fee, and a [`CartManager`](cart::CartManager) that persists every
//!   mutation through a [`printease_store::Store`]
//! - **Checkout**: the checkout state machine, payment methods, customer
//!   details and the order submission port
//! - **Forms**: contact and custom-design request validation
//! - **Session**: [`StorefrontSession`](session::StorefrontSession) ties it
//!   all together on a virtual clock
//!
//! # Example
//!
//! ```rust
//! use printease_commerce::prelude::*;
//! use printease_store::MemoryStore;
//! use std::time::Duration;
//!
//! let settings = CommerceSettings {
//!     require_customer_details: false,
//!     ..CommerceSettings::default()
//! };
//! let mut session = StorefrontSession::simulated(MemoryStore::new(), settings)?;
//!
//! let mug = Money::new(10_000, Currency::PHP);
//! session.add_to_cart(ProductCandidate::new("mug", "Custom Mug", mug, "img/mug.jpg"))?;
//! assert_eq!(session.snapshot()?.totals.total.display(), "\u{20b1}150.00");
//!
//! session.open_checkout()?;
//! session.submit_checkout(Some(PaymentMethod::CashOnDelivery), None)?;
//! let signals = session.advance(Duration::from_secs(3));
//!
//! assert!(signals.contains(&SessionSignal::RedirectToLanding));
//! assert!(session.cart().is_empty());
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod forms;
pub mod notify;
pub mod session;
pub mod settings;
pub mod timer;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use settings::CommerceSettings;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::settings::CommerceSettings;

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartManager, CartSnapshot, CartTotals, LineItem, ProductCandidate,
        QuantityChange, ShippingPolicy,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutState, CustomerDetails, OrderRequest, OrderSubmitter,
        PaymentMethod, SimulatedSubmitter, SubmissionResult,
    };

    // Forms, notifications, session
    pub use crate::forms::{ContactForm, DesignFile, DesignRequest};
    pub use crate::notify::{Notification, NotificationCenter, Notifier, Severity};
    pub use crate::session::{SessionSignal, StorefrontSession};
    pub use crate::timer::{TimerHandle, TimerQueue};
}
