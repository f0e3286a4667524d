//! Integration test for durable-storage hydration through the file adapter.
//!
//! A page reload is modeled as dropping the store and hydrating a fresh one
//! from the same directory: the last committed cart must come back exactly,
//! and malformed stored data must fall back to an empty cart with the stale
//! entry cleared.

use std::fs;

use testresult::TestResult;

use hemline::prelude::*;

fn cardigan() -> LineItem {
    LineItem::new(6, 61, "Dalisay Cardigan", Price::from_pesos(1299), Size::L, "oat")
        .with_image(vec![ImageFormat {
            url: "https://ik.example/dalisay-cardigan.webp".to_string(),
            width: 768,
        }])
}

#[test]
fn reload_restores_the_last_committed_cart() -> TestResult {
    let dir = tempfile::tempdir()?;

    let mut store = CartStore::hydrate(JsonFileStorage::new(dir.path()));
    store.dispatch(CartAction::Increment(cardigan()));
    store.dispatch(CartAction::Increment(cardigan()));
    drop(store);

    let reloaded = CartStore::hydrate(JsonFileStorage::new(dir.path()));

    assert_eq!(reloaded.state().items().len(), 1);
    assert_eq!(reloaded.state().unit_count(), 2);
    assert_eq!(
        reloaded.state().items().first().map(LineItem::price),
        Some(Price::new(129_900))
    );

    Ok(())
}

#[test]
fn reload_after_emptying_the_cart_stays_empty() -> TestResult {
    let dir = tempfile::tempdir()?;

    let mut store = CartStore::hydrate(JsonFileStorage::new(dir.path()));
    store.dispatch(CartAction::Increment(cardigan()));
    store.dispatch(CartAction::Delete { variant_id: 61 });
    drop(store);

    let reloaded = CartStore::hydrate(JsonFileStorage::new(dir.path()));

    assert!(reloaded.state().is_empty(), "the committed empty list wins");

    Ok(())
}

#[test]
fn malformed_stored_data_starts_empty_and_clears_the_entry() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cart_file = dir.path().join(format!("{SHOPPING_CART_KEY}.json"));

    fs::write(&cart_file, "[{\"productId\": oops")?;

    let store = CartStore::hydrate(JsonFileStorage::new(dir.path()));

    assert!(store.state().is_empty());
    assert!(!cart_file.exists(), "corrupt entry must be cleared");

    // The next session loads cleanly.
    let reloaded = CartStore::hydrate(JsonFileStorage::new(dir.path()));
    assert!(reloaded.state().is_empty());

    Ok(())
}

#[test]
fn stored_value_is_a_json_array_of_line_items() -> TestResult {
    let dir = tempfile::tempdir()?;

    let mut store = CartStore::hydrate(JsonFileStorage::new(dir.path()));
    store.dispatch(CartAction::Increment(cardigan()));

    let raw = fs::read_to_string(dir.path().join(format!("{SHOPPING_CART_KEY}.json")))?;
    let parsed: Vec<LineItem> = serde_json::from_str(&raw)?;

    assert!(raw.starts_with('['), "value is a JSON array");
    assert_eq!(parsed, store.state().items());

    Ok(())
}
