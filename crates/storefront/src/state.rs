//! Application state injected at the application root.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::notifications::Notifier;
use crate::stores::{CartStore, StorefrontBackend, WishlistStore};
use crate::supabase::{BackendError, SupabaseClient};

/// Application state shared across the embedding UI.
///
/// This struct is cheaply cloneable via `Arc` and is the only place the
/// stores, the gateway, and the notification queue are wired together -
/// nothing in the crate reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    supabase: SupabaseClient,
    cart: CartStore,
    wishlist: WishlistStore,
    notifier: Notifier,
}

impl AppState {
    /// Wire up the gateway and stores from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway's HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let notifier = Notifier::new();
        let supabase = SupabaseClient::new(&config, notifier.clone())?;

        let backend: Arc<dyn StorefrontBackend> = Arc::new(supabase.clone());
        let cart = CartStore::new(Arc::clone(&backend));
        let wishlist = WishlistStore::new(backend, notifier.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                cart,
                wishlist,
                notifier,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Supabase gateway.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Get a reference to the notification queue.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
