//! Storefront settings.
//!
//! Every field has a default matching the live shop, so an empty
//! `[commerce]` table is a valid configuration.

use std::time::Duration;

use crate::cart::ShippingPolicy;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default storage key for the cart blob.
pub const DEFAULT_STORAGE_KEY: &str = "printease_cart";

/// Tunables for cart, checkout and forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommerceSettings {
    /// Storage key holding the serialized cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency of all prices.
    #[serde(default)]
    pub currency: Currency,

    /// Flat shipping fee in minor units, charged once per non-empty order.
    #[serde(default = "default_shipping_fee_cents")]
    pub shipping_fee_cents: i64,

    /// How long a notification stays visible.
    #[serde(default = "default_notification_ms")]
    pub notification_dismiss_ms: u64,

    /// Delay between the success acknowledgement and the redirect.
    #[serde(default = "default_redirect_ms")]
    pub redirect_delay_ms: u64,

    /// Simulated order-submission latency.
    #[serde(default)]
    pub submission_latency_ms: u64,

    /// Require name, email, phone and address at checkout.
    #[serde(default = "default_true")]
    pub require_customer_details: bool,

    /// Simulated latency of contact and design form submissions.
    #[serde(default = "default_form_latency_ms")]
    pub form_latency_ms: u64,

    /// Largest accepted design upload.
    #[serde(default = "default_max_design_file_bytes")]
    pub max_design_file_bytes: u64,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_shipping_fee_cents() -> i64 {
    5000
}

fn default_notification_ms() -> u64 {
    3000
}

fn default_redirect_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_form_latency_ms() -> u64 {
    1500
}

fn default_max_design_file_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for CommerceSettings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: Currency::default(),
            shipping_fee_cents: default_shipping_fee_cents(),
            notification_dismiss_ms: default_notification_ms(),
            redirect_delay_ms: default_redirect_ms(),
            submission_latency_ms: 0,
            require_customer_details: true,
            form_latency_ms: default_form_latency_ms(),
            max_design_file_bytes: default_max_design_file_bytes(),
        }
    }
}

impl CommerceSettings {
    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.storage_key.trim().is_empty() {
            return Err(CommerceError::Validation(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.shipping_fee_cents < 0 {
            return Err(CommerceError::Validation(format!(
                "shipping_fee_cents must not be negative (got {})",
                self.shipping_fee_cents
            )));
        }
        Ok(())
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::flat(Money::new(self.shipping_fee_cents, self.currency))
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn submission_latency(&self) -> Duration {
        Duration::from_millis(self.submission_latency_ms)
    }

    pub fn form_latency(&self) -> Duration {
        Duration::from_millis(self.form_latency_ms)
    }
}
