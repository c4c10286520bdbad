//! Checkout command.

use anyhow::{bail, Context as _, Result};
use printease_commerce::checkout::{CheckoutState, CustomerDetails, PaymentMethod};
use printease_commerce::session::SessionSignal;
use serde::Serialize;

use super::{drive_until, CheckoutArgs};
use crate::context::Context;
use crate::output::NotificationLog;

#[derive(Serialize)]
struct Receipt<'a> {
    order_id: &'a str,
    payment: PaymentMethod,
    item_count: i64,
    total: String,
    placed_at: String,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let payment = args
        .payment
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()?;
    let customer = customer_from_args(&args);

    let mut session = ctx.open_session()?;
    let mut log = NotificationLog::default();

    let opened = session.open_checkout();
    log.show_new(&ctx.output, session.notifications());
    opened.context("Cannot start checkout")?;

    let submitted = session.submit_checkout(payment, customer);
    log.show_new(&ctx.output, session.notifications());
    let order_id = submitted.context("Checkout failed")?;

    let order = session
        .pending_order()
        .cloned()
        .context("Submitted order went missing")?;
    ctx.output.header(&format!("Order {}", order_id));
    ctx.output.kv("Payment", order.payment.display_name());
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Total", &order.totals.total.display());

    let signals = drive_until(&mut session, &ctx.output, &mut log, args.no_wait, |s, seen| {
        seen.contains(&SessionSignal::RedirectToLanding)
            || !matches!(
                s.checkout_state(),
                CheckoutState::Submitting { .. } | CheckoutState::Success { .. }
            )
    })
    .await;

    match session.checkout_state() {
        CheckoutState::Success { order_id } => {
            if ctx.output.is_json() {
                ctx.output.json(&Receipt {
                    order_id: order_id.as_str(),
                    payment: order.payment,
                    item_count: order.item_count(),
                    total: order.totals.total.display(),
                    placed_at: chrono::Utc::now().to_rfc3339(),
                });
            }
            ctx.output.success(&format!("Order {} placed. Your cart is now empty.", order_id));
            if signals.contains(&SessionSignal::RedirectToLanding) {
                ctx.output.debug("Returning to the landing page");
            }
            Ok(())
        }
        CheckoutState::ValidationFailed { reason } => bail!("Order was not placed: {}", reason),
        other => bail!("Checkout ended in unexpected state '{}'", other.as_str()),
    }
}

fn customer_from_args(args: &CheckoutArgs) -> Option<CustomerDetails> {
    let fields = [&args.name, &args.email, &args.phone, &args.address];
    if fields.iter().all(|f| f.is_none()) {
        return None;
    }
    let field = |f: &Option<String>| f.clone().unwrap_or_default();
    Some(CustomerDetails::new(
        field(&args.name),
        field(&args.email),
        field(&args.phone),
        field(&args.address),
    ))
}
