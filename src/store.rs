//! Cart store
//!
//! [`CartStore`] runs the pure reducer and keeps durable storage consistent:
//! every action that changes the line-item list is written through before
//! `dispatch` returns, including when the list becomes empty, so a reload
//! always sees the last committed cart. Storage failures never propagate —
//! they are logged and the in-memory state still advances.

use crate::{
    cart::{CartAction, CartState},
    storage::CartStorage,
};

/// Reducer-backed cart store with an injected persistence adapter.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Creates a store with an empty cart, without touching storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            state: CartState::default(),
            storage,
        }
    }

    /// Builds the store by reading the persisted cart once.
    ///
    /// Malformed or unreadable data falls back to an empty cart, and the
    /// stale entry is cleared (best effort) so the next load starts clean.
    #[must_use]
    pub fn hydrate(mut storage: S) -> Self {
        let mut state = CartState::default();

        match storage.load() {
            Ok(Some(items)) => {
                state.apply(CartAction::SetCart(items));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not load stored cart; starting empty");

                if let Err(err) = storage.clear() {
                    tracing::warn!(error = %err, "could not clear stale cart entry");
                }
            }
        }

        Self { state, storage }
    }

    /// Applies an action, persisting the line-item list when it changed.
    ///
    /// A failed save is logged and swallowed; the in-memory cart is already
    /// advanced and the next successful save will catch storage up.
    pub fn dispatch(&mut self, action: CartAction) {
        if self.state.apply(action) {
            self.persist();
        }
    }

    /// Empties the cart and drops the stored entry (after a confirmed order).
    pub fn clear(&mut self) {
        self.state.apply(CartAction::SetCart(Vec::new()));

        if let Err(err) = self.storage.clear() {
            tracing::warn!(error = %err, "could not clear stored cart after order");
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Opens or closes the cart drawer. Display state only, never persisted.
    pub fn set_cart_open(&mut self, open: bool) {
        self.state.set_cart_open(open);
    }

    /// The injected storage adapter.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.save(self.state.items()) {
            tracing::warn!(error = %err, "could not persist cart; keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        items::{LineItem, Size},
        prices::Price,
        storage::{CartStorage, MemoryStorage, SHOPPING_CART_KEY, StorageError},
    };

    use super::*;

    fn tee(variant_id: u64) -> LineItem {
        LineItem::new(9, variant_id, "Harbor Tee", Price::from_pesos(499), Size::M, "cream")
    }

    #[test]
    fn dispatch_persists_after_every_cart_change() -> TestResult {
        let mut store = CartStore::new(MemoryStorage::new());

        store.dispatch(CartAction::Increment(tee(41)));
        store.dispatch(CartAction::Increment(tee(41)));

        let stored = store.storage().load()?.ok_or("expected a stored cart")?;

        assert_eq!(stored, store.state().items());
        assert_eq!(stored.first().map(LineItem::qty), Some(2));

        Ok(())
    }

    #[test]
    fn dispatch_persists_the_empty_list_after_the_last_delete() -> TestResult {
        let mut store = CartStore::new(MemoryStorage::new());

        store.dispatch(CartAction::Increment(tee(41)));
        store.dispatch(CartAction::Delete { variant_id: 41 });

        assert_eq!(store.storage().raw(SHOPPING_CART_KEY), Some("[]"));

        Ok(())
    }

    #[test]
    fn promotion_and_tier_dispatches_do_not_write_storage() {
        let mut store = CartStore::new(MemoryStorage::new());

        store.dispatch(CartAction::SetPromotion(None));
        store.dispatch(CartAction::SetShippingTier(None));

        assert_eq!(store.storage().raw(SHOPPING_CART_KEY), None);
    }

    #[test]
    fn hydrate_restores_a_previously_saved_cart() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.save(&[tee(41).with_qty(2), tee(42)])?;

        let store = CartStore::hydrate(storage);

        assert_eq!(store.state().items().len(), 2);
        assert_eq!(store.state().unit_count(), 3);

        Ok(())
    }

    #[test]
    fn hydrate_with_empty_storage_starts_empty() {
        let store = CartStore::hydrate(MemoryStorage::new());

        assert!(store.state().is_empty());
    }

    #[test]
    fn hydrate_clears_malformed_data_and_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(SHOPPING_CART_KEY, "{\"definitely\": \"not a cart\"");

        let store = CartStore::hydrate(storage);

        assert!(store.state().is_empty());
        assert_eq!(
            store.storage().raw(SHOPPING_CART_KEY),
            None,
            "corrupt entry must be cleared"
        );
    }

    #[test]
    fn clear_empties_both_cart_and_storage() -> TestResult {
        let mut store = CartStore::new(MemoryStorage::new());

        store.dispatch(CartAction::Increment(tee(41)));
        store.clear();

        assert!(store.state().is_empty());
        assert_eq!(store.storage().raw(SHOPPING_CART_KEY), None);

        Ok(())
    }

    #[test]
    fn set_cart_open_does_not_write_storage() {
        let mut store = CartStore::new(MemoryStorage::new());

        store.set_cart_open(true);

        assert!(store.state().is_cart_open());
        assert_eq!(store.storage().raw(SHOPPING_CART_KEY), None);
    }

    /// Adapter that fails every operation, standing in for an exhausted
    /// quota or an unavailable backing store.
    #[derive(Debug, Default)]
    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("storage offline")))
        }

        fn save(&mut self, _cart: &[LineItem]) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("storage offline")))
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("storage offline")))
        }
    }

    #[test]
    fn storage_failures_never_block_the_in_memory_cart() {
        let mut store = CartStore::hydrate(BrokenStorage);

        store.dispatch(CartAction::Increment(tee(41)));
        store.dispatch(CartAction::Increment(tee(41)));
        store.clear();
        store.dispatch(CartAction::Increment(tee(42)));

        assert_eq!(store.state().items().len(), 1);
        assert_eq!(store.state().unit_count(), 1);
    }
}
