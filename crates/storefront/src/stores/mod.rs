//! Reactive state containers for the cart and wishlist.
//!
//! Both stores follow the same discipline: snapshot current state, apply the
//! speculative change locally, attempt the remote effect, reconcile with an
//! authoritative refetch on success, restore the snapshot on failure. The UI
//! reads store state between renders and calls the action methods; only the
//! stores themselves mutate.
//!
//! Ordering under rapid-fire mutations is deliberately weak: every mutation
//! ends in a refetch and the last refetch to resolve wins. There is no
//! operation queue or request de-duplication.

mod cart;
mod wishlist;

pub use cart::CartStore;
pub use wishlist::WishlistStore;

use std::future::Future;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rewired_core::{CartItemId, WishlistItemId};

use crate::supabase::BackendError;
use crate::supabase::types::{CartItem, NewOrder, Order, Product, WishlistItem};

// =============================================================================
// Backend seam
// =============================================================================

/// The remote operations the stores and checkout flow depend on.
///
/// [`SupabaseClient`](crate::supabase::SupabaseClient) is the production
/// implementation; tests substitute an in-memory fake with failure injection.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    async fn get_cart(&self) -> Result<Vec<CartItem>, BackendError>;
    async fn add_cart_item(&self, product: &Product, quantity: u32) -> Result<(), BackendError>;
    async fn update_cart_item(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError>;
    async fn remove_cart_item(&self, id: &CartItemId) -> Result<(), BackendError>;
    async fn clear_cart(&self) -> Result<(), BackendError>;

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, BackendError>;
    async fn add_wishlist_item(&self, product: &Product) -> Result<(), BackendError>;
    async fn remove_wishlist_item(&self, id: &WishlistItemId) -> Result<(), BackendError>;

    async fn create_order(&self, order: NewOrder) -> Result<Order, BackendError>;
}

// =============================================================================
// Shared store machinery
// =============================================================================

/// Observable state common to both stores.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
    /// Current rows.
    pub items: Vec<T>,
    /// Whether a gateway call is in flight.
    pub is_loading: bool,
    /// Message from the most recent failed operation, cleared on the next
    /// attempt.
    pub last_error: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            last_error: None,
        }
    }
}

/// Replace the item list with a fresh snapshot from the backend.
///
/// On failure the existing items are left untouched and the error recorded;
/// stale data is an acceptable degraded state.
pub(crate) async fn replace_items<T, F>(
    state: &RwLock<StoreState<T>>,
    fetch: F,
) -> Result<(), BackendError>
where
    F: Future<Output = Result<Vec<T>, BackendError>>,
{
    {
        let mut guard = state.write().await;
        guard.is_loading = true;
        guard.last_error = None;
    }

    let result = fetch.await;
    let mut guard = state.write().await;
    guard.is_loading = false;
    match result {
        Ok(items) => {
            guard.items = items;
            Ok(())
        }
        Err(err) => {
            guard.last_error = Some(err.to_string());
            Err(err)
        }
    }
}

/// Run one optimistic mutation: apply the speculative change, persist it,
/// reconcile via refetch, roll back to the snapshot on failure.
///
/// If the persist succeeds but the reconciling refetch fails, the optimistic
/// state is kept and the refetch error recorded; the next successful fetch
/// restores authoritative truth.
pub(crate) async fn run_optimistic<T, E, R>(
    state: &RwLock<StoreState<T>>,
    apply: impl FnOnce(&mut Vec<T>),
    effect: E,
    refetch: R,
) -> Result<(), BackendError>
where
    T: Clone,
    E: Future<Output = Result<(), BackendError>>,
    R: Future<Output = Result<Vec<T>, BackendError>>,
{
    let snapshot = {
        let mut guard = state.write().await;
        let snapshot = guard.items.clone();
        apply(&mut guard.items);
        guard.is_loading = true;
        guard.last_error = None;
        snapshot
    };

    match effect.await {
        Ok(()) => {
            let result = refetch.await;
            let mut guard = state.write().await;
            guard.is_loading = false;
            match result {
                Ok(items) => guard.items = items,
                Err(err) => guard.last_error = Some(err.to_string()),
            }
            Ok(())
        }
        Err(err) => {
            let mut guard = state.write().await;
            guard.items = snapshot;
            guard.is_loading = false;
            guard.last_error = Some(err.to_string());
            Err(err)
        }
    }
}
