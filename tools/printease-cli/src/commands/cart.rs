//! Cart and totals commands.

use anyhow::{anyhow, Result};
use printease_commerce::cart::{CartSnapshot, ProductCandidate, QuantityChange};
use printease_commerce::{Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::NotificationLog;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add {
            id,
            name,
            price,
            image,
        } => add(id, name, &price, image, ctx),
        CartCommand::List => list(ctx),
        CartCommand::Qty { id, delta } => change_quantity(&id, delta, ctx),
        CartCommand::Remove { id } => remove(&id, ctx),
        CartCommand::Clear => clear(ctx),
    }
}

/// Run the totals command.
pub async fn totals(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let totals = session.cart().calculate_totals(&session.settings().shipping_policy())?;

    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }

    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping_fee.display());
    ctx.output.kv("Total", &totals.total.display());
    Ok(())
}

fn add(id: String, name: String, price: &str, image: String, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let currency = session.settings().currency;
    let unit_price = Money::parse(price, currency)
        .ok_or_else(|| anyhow!("Invalid price '{}': expected a decimal amount like 49.99", price))?;

    let mut log = NotificationLog::default();
    let result = session.add_to_cart(ProductCandidate::new(id, name, unit_price, image));
    log.show_new(&ctx.output, session.notifications());
    result?;

    ctx.output.debug(&format!("{} item(s) in cart", session.cart().item_count()));
    print_json_snapshot(&session.snapshot()?, ctx);
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let snapshot = session.snapshot()?;

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    if snapshot.items.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", snapshot.item_count));
    let widths = [12, 28, 12, 5, 12];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for (item, line) in snapshot.items.iter().zip(&snapshot.totals.line_items) {
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &item.name,
                &item.unit_price.display(),
                &item.quantity.to_string(),
                &line.total.display(),
            ],
            &widths,
        );
    }
    println!();
    ctx.output.kv("Subtotal", &snapshot.totals.subtotal.display());
    ctx.output.kv("Shipping", &snapshot.totals.shipping_fee.display());
    ctx.output.kv("Total", &snapshot.totals.total.display());
    Ok(())
}

fn change_quantity(id: &str, delta: i64, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let id = ProductId::new(id);

    let mut log = NotificationLog::default();
    let result = session.change_quantity(&id, delta);
    log.show_new(&ctx.output, session.notifications());

    match result? {
        QuantityChange::Updated { quantity } => {
            ctx.output.success(&format!("{} quantity is now {}", id, quantity));
        }
        QuantityChange::Removed => {}
        QuantityChange::NotFound => ctx.output.warn(&format!("{} is not in the cart", id)),
    }
    print_json_snapshot(&session.snapshot()?, ctx);
    Ok(())
}

fn remove(id: &str, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let id = ProductId::new(id);

    let mut log = NotificationLog::default();
    let result = session.remove_item(&id);
    log.show_new(&ctx.output, session.notifications());

    if !result? {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    print_json_snapshot(&session.snapshot()?, ctx);
    Ok(())
}

fn clear(ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let result = session.clear_cart();
    NotificationLog::default().show_new(&ctx.output, session.notifications());
    result?;

    ctx.output.success("Cart cleared");
    print_json_snapshot(&session.snapshot()?, ctx);
    Ok(())
}

fn print_json_snapshot(snapshot: &CartSnapshot, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(snapshot);
    }
}
