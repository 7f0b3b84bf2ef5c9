//! The wishlist store.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use rewired_core::{ProductId, WishlistItemId};

use crate::notifications::Notifier;
use crate::supabase::BackendError;
use crate::supabase::types::{Product, WishlistItem};

use super::{StoreState, StorefrontBackend, replace_items, run_optimistic};

/// Reactive wishlist state; the cart store's optimistic discipline minus
/// quantities.
///
/// Adding a product that is already saved is an idempotent no-op with an
/// informational notification, not an error.
pub struct WishlistStore {
    backend: Arc<dyn StorefrontBackend>,
    notifier: Notifier,
    state: RwLock<StoreState<WishlistItem>>,
}

impl WishlistStore {
    /// Create an empty wishlist store.
    #[must_use]
    pub fn new(backend: Arc<dyn StorefrontBackend>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Current rows, in backend order.
    pub async fn items(&self) -> Vec<WishlistItem> {
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
    /// Returns the fetch error; existing items are left untouched.
    pub async fn fetch_wishlist(&self) -> Result<(), BackendError> {
        replace_items(&self.state, self.backend.get_wishlist()).await
    }

    /// Save a product. Already-saved products are left alone.
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn add(&self, product: &Product) -> Result<(), BackendError> {
        if self.is_in_wishlist(&product.id).await {
            self.notifier
                .info(format!("{} is already in your wishlist.", product.name));
            return Ok(());
        }

        let temp_id = WishlistItemId::new(format!("tmp-{}", Uuid::new_v4()));
        run_optimistic(
            &self.state,
            |items| {
                items.push(WishlistItem {
                    id: temp_id,
                    product_id: product.id.clone(),
                    product: product.clone(),
                });
            },
            self.backend.add_wishlist_item(product),
            self.backend.get_wishlist(),
        )
        .await
    }

    /// Remove a saved product. Unknown products are a no-op.
    ///
    /// # Errors
    ///
    /// Returns the persist error after rolling the items back.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), BackendError> {
        let Some(id) = self
            .state
            .read()
            .await
            .items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map(|item| item.id.clone())
        else {
            return Ok(());
        };

        run_optimistic(
            &self.state,
            |items| items.retain(|item| &item.product_id != product_id),
            self.backend.remove_wishlist_item(&id),
            self.backend.get_wishlist(),
        )
        .await
    }

    /// Whether the product is saved.
    pub async fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.state
            .read()
            .await
            .items
            .iter()
            .any(|item| &item.product_id == product_id)
    }

    /// Number of saved products (row count; there are no quantities).
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }
}
