//! End-to-end storefront flows against a file-backed store.
//!
//! Each test plays the part of one or more page loads: a session is opened
//! on a directory, used, dropped, and a new session is opened on the same
//! directory to check what survived.

use std::time::Duration;

use printease_commerce::prelude::*;
use printease_store::{FileStore, Store};
use tempfile::TempDir;

fn php(major: i64) -> Money {
    Money::new(major * 100, Currency::PHP)
}

fn sticker() -> ProductCandidate {
    ProductCandidate::new("1", "Custom Stickers", php(10), "images/stickers.jpg")
}

fn tshirt() -> ProductCandidate {
    ProductCandidate::new("2", "Printed T-Shirt", php(250), "images/tshirt.jpg")
}

fn open(dir: &TempDir) -> StorefrontSession<FileStore> {
    let store = FileStore::open(dir.path()).unwrap();
    StorefrontSession::simulated(store, CommerceSettings::default()).unwrap()
}

fn customer() -> CustomerDetails {
    CustomerDetails::new(
        "Andres Bonifacio",
        "andres@example.ph",
        "09170001111",
        "Tondo, Manila",
    )
}

#[test]
fn cart_survives_page_reload() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = open(&dir);
        session.add_to_cart(sticker()).unwrap();
        session.add_to_cart(sticker()).unwrap();
        session.add_to_cart(tshirt()).unwrap();
        session.change_quantity(&ProductId::new("1"), 3).unwrap();
    }

    let session = open(&dir);
    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.item_count, 6);
    assert_eq!(snapshot.items[0].id.as_str(), "1");
    assert_eq!(snapshot.items[0].quantity, 5);
    assert_eq!(snapshot.totals.subtotal, php(300));
    assert_eq!(snapshot.totals.shipping_fee, php(50));
    assert_eq!(snapshot.totals.total, php(350));
}

#[test]
fn persisted_layout_is_a_plain_record_array() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.add_to_cart(tshirt()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("printease_cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": "2",
            "name": "Printed T-Shirt",
            "price": 250.0,
            "image": "images/tshirt.jpg",
            "quantity": 1
        }])
    );
}

#[test]
fn corrupt_cart_file_starts_empty_and_is_overwritten() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("printease_cart.json"), "not json at all").unwrap();

    let mut session = open(&dir);
    assert!(session.cart().is_empty());

    session.add_to_cart(sticker()).unwrap();
    drop(session);
    assert_eq!(open(&dir).cart().item_count(), 1);
}

#[test]
fn checkout_clears_cart_and_redirects() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.add_to_cart(sticker()).unwrap();
    session.add_to_cart(tshirt()).unwrap();

    session.open_checkout().unwrap();
    let order_id = session
        .submit_checkout(Some(PaymentMethod::GCash), Some(customer()))
        .unwrap();

    let order = session.pending_order().unwrap().clone();
    assert_eq!(order.order_id, order_id);
    assert_eq!(order.totals.total, php(310));
    assert_eq!(order.payment, PaymentMethod::GCash);

    let signals = session.advance(Duration::from_secs(3));
    assert_eq!(
        signals,
        vec![
            SessionSignal::OrderPlaced(order_id.clone()),
            SessionSignal::RedirectToLanding
        ]
    );
    assert_eq!(session.checkout_state(), &CheckoutState::Success { order_id });

    let store = session.into_store();
    assert_eq!(store.get("printease_cart").unwrap().as_deref(), Some("[]"));
    assert!(open(&dir).cart().is_empty());
}

#[test]
fn empty_cart_cannot_check_out() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    assert!(matches!(
        session.open_checkout(),
        Err(CommerceError::EmptyCartCheckout)
    ));
    assert_eq!(session.checkout_state(), &CheckoutState::Idle);
    assert!(matches!(
        session.submit_checkout(Some(PaymentMethod::CashOnDelivery), Some(customer())),
        Err(CommerceError::InvalidCheckoutTransition { .. })
    ));
}

#[test]
fn removing_last_unit_removes_the_row_for_good() {
    let dir = TempDir::new().unwrap();
    {
        let mut session = open(&dir);
        session.add_to_cart(sticker()).unwrap();
        session.add_to_cart(tshirt()).unwrap();
        assert_eq!(
            session.change_quantity(&ProductId::new("2"), -1).unwrap(),
            QuantityChange::Removed
        );
        assert!(session.remove_item(&ProductId::new("1")).unwrap());
    }

    let session = open(&dir);
    assert!(session.cart().is_empty());
    assert_eq!(session.snapshot().unwrap().totals.total, Money::zero(Currency::PHP));
}
