//! The cart store.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use rewired_core::{CartItemId, Price, ProductId};

use crate::supabase::BackendError;
use crate::supabase::types::{CartItem, Product};

use super::{StoreState, StorefrontBackend, replace_items, run_optimistic};

/// Reactive cart state with optimistic updates.
///
/// Every mutating action applies locally first, persists through the
/// backend, then reconciles with an authoritative refetch (which also
/// resolves the temporary ids of freshly-added rows and any server-side
/// quantity clamping). Failed persists roll the items back to the pre-call
/// snapshot.
pub struct CartStore {
    backend: Arc<dyn StorefrontBackend>,
    state: RwLock<StoreState<CartItem>>,
}

impl CartStore {
    /// Create an empty cart store.
    #[must_use]
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Current rows, in backend order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.state.read().await.items.clone()
    }

    /// Whether a gateway call is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Message from the most recent failed operation.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Replace the item list with the backend's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; existing items are left untouched, so an
    /// anonymous visitor degrades to an empty cart rather than a crash.
    pub async fn fetch_cart(&self) -> Result<(), BackendError> {
        replace_items(&self.state, self.backend.get_cart()).await
    }

    /// Add a product, or bump the quantity of its existing row. At most one
    /// row exists per product.
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<(), BackendError> {
        let temp_id = CartItemId::new(format!("tmp-{}", Uuid::new_v4()));
        run_optimistic(
            &self.state,
            |items| {
                let existing = items
                    .iter()
                    .position(|item| item.product_id == product.id);
                if let Some(item) = existing.and_then(|pos| items.get_mut(pos)) {
                    item.quantity += quantity;
                } else {
                    items.push(CartItem {
                        id: temp_id,
                        product_id: product.id.clone(),
                        quantity,
                        product: product.clone(),
                    });
                }
            },
            self.backend.add_cart_item(product, quantity),
            self.backend.get_cart(),
        )
        .await
    }

    /// Set a row's quantity. Zero delegates to [`Self::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        if quantity == 0 {
            return self.remove_item(id).await;
        }

        run_optimistic(
            &self.state,
            |items| {
                if let Some(item) = items.iter_mut().find(|item| &item.id == id) {
                    item.quantity = quantity;
                }
            },
            self.backend.update_cart_item(id, quantity),
            self.backend.get_cart(),
        )
        .await
    }

    /// Remove a row.
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn remove_item(&self, id: &CartItemId) -> Result<(), BackendError> {
        run_optimistic(
            &self.state,
            |items| items.retain(|item| &item.id != id),
            self.backend.remove_cart_item(id),
            self.backend.get_cart(),
        )
        .await
    }

    /// Remove every row.
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn clear(&self) -> Result<(), BackendError> {
        run_optimistic(
            &self.state,
            Vec::clear,
            self.backend.clear_cart(),
            self.backend.get_cart(),
        )
        .await
    }

    /// Sum of snapshot price × quantity across all rows. Uses the price
    /// carried on each row, so totals stay stable when the catalog price
    /// changes after the item was added.
    pub async fn total(&self) -> Price {
        self.state
            .read()
            .await
            .items
            .iter()
            .map(CartItem::line_total)
            .sum()
    }

    /// Sum of quantities (the badge count, distinct from the row count).
    pub async fn item_count(&self) -> u32 {
        self.state
            .read()
            .await
            .items
            .iter()
            .map(|item| item.quantity)
            .sum()
    }

    /// Whether any row references the product.
    pub async fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.state
            .read()
            .await
            .items
            .iter()
            .any(|item| &item.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::stores::testing::UnusedBackend;

    use super::*;

    fn store_with(items: Vec<CartItem>) -> CartStore {
        CartStore {
            backend: Arc::new(UnusedBackend),
            state: RwLock::new(StoreState {
                items,
                is_loading: false,
                last_error: None,
            }),
        }
    }

    fn row(id: &str, product: Product, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product_id: product.id.clone(),
            quantity,
            product,
        }
    }

    #[tokio::test]
    async fn test_total_and_item_count() {
        let mut a = fixtures::tablet();
        a.price = Price::from(10);
        let mut b = fixtures::phone();
        b.price = Price::from(25);

        let store = store_with(vec![row("ci-a", a, 2), row("ci-b", b, 1)]);

        assert_eq!(store.total().await, Price::from(45));
        assert_eq!(store.item_count().await, 3);
    }

    #[tokio::test]
    async fn test_is_in_cart() {
        let store = store_with(vec![row("ci-a", fixtures::tablet(), 1)]);

        assert!(store.is_in_cart(&fixtures::tablet().id).await);
        assert!(!store.is_in_cart(&fixtures::phone().id).await);
    }

    #[tokio::test]
    async fn test_empty_store_derivations() {
        let store = store_with(Vec::new());

        assert_eq!(store.total().await, Price::ZERO);
        assert_eq!(store.item_count().await, 0);
        assert!(store.items().await.is_empty());
        assert!(!store.is_loading().await);
    }
}
