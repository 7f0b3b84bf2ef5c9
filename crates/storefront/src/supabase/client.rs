//! The Supabase client: PostgREST tables plus GoTrue auth.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use rewired_core::{CartItemId, OrderId, ProductId, UserId, WishlistItemId};

use crate::config::StorefrontConfig;
use crate::notifications::Notifier;
use crate::stores::StorefrontBackend;

use super::BackendError;
use super::auth::{AuthErrorBody, AuthSession, TokenResponse};
use super::rows::{
    CartItemRow, NewCartItemRow, NewWishlistItemRow, OrderRow, ProductRow, WishlistItemRow,
    convert_cart_item, convert_order, convert_product, convert_wishlist_item, new_order_to_row,
    product_to_row,
};
use super::types::{CartItem, NewOrder, Order, Product, WishlistItem};

/// Cached value types for product reads.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}

// =============================================================================
// SupabaseClient
// =============================================================================

/// Client for the Supabase backend.
///
/// Provides typed access to the `products`, `cart`, `wishlist`, and `orders`
/// tables and to GoTrue session management. Product reads are cached for
/// 5 minutes; user-scoped tables are never cached.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    http: reqwest::Client,
    base_url: String,
    anon_key: secrecy::SecretString,
    session: RwLock<Option<AuthSession>>,
    cache: Cache<String, CacheValue>,
    notifier: Notifier,
}

impl SupabaseClient {
    /// Create a new Supabase client.
    ///
    /// The request timeout from the configuration applies to every call; on
    /// expiry the call fails like any other transient error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig, notifier: Notifier) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                http,
                base_url: config.supabase.url.trim_end_matches('/').to_owned(),
                anon_key: config.supabase.anon_key.clone(),
                session: RwLock::new(None),
                cache,
                notifier,
            }),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.inner.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.inner.base_url)
    }

    /// Bearer token for the current request: the session token when signed
    /// in, the anon key otherwise.
    async fn bearer_token(&self) -> String {
        match self.inner.session.read().await.as_ref() {
            Some(session) => session.access_token.expose_secret().to_owned(),
            None => self.inner.anon_key.expose_secret().to_owned(),
        }
    }

    /// Send a PostgREST request, mapping non-success statuses to
    /// [`BackendError::Api`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        let response = request
            .header("apikey", self.inner.anon_key.expose_secret())
            .bearer_auth(self.bearer_token().await)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        Ok(response)
    }

    /// Centralized error-to-notification mapping: push a resource-specific
    /// message for the user, then re-throw so the calling store can roll
    /// back.
    fn surface<T>(
        &self,
        result: Result<T, BackendError>,
        fallback: &str,
    ) -> Result<T, BackendError> {
        if let Err(err) = &result {
            warn!(error = %err, "supabase call failed");
            if err.is_login_required() {
                self.inner.notifier.error("Sign in to continue.");
            } else {
                self.inner.notifier.error(fallback);
            }
        }
        result
    }

    /// The signed-in user, or [`BackendError::LoginRequired`].
    async fn require_user(&self) -> Result<UserId, BackendError> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(BackendError::LoginRequired)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// The current session, if signed in.
    pub async fn session(&self) -> Option<AuthSession> {
        self.inner.session.read().await.clone()
    }

    /// The signed-in user's id, if any.
    pub async fn current_user_id(&self) -> Option<UserId> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.user_id.clone())
    }

    async fn auth_post(
        &self,
        url: String,
        query: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<TokenResponse, BackendError> {
        let response = self
            .inner
            .http
            .post(url)
            .query(query)
            .header("apikey", self.inner.anon_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = serde_json::from_str::<AuthErrorBody>(&text)
                .map(AuthErrorBody::message)
                .unwrap_or_else(|_| text.chars().take(200).collect());
            return Err(BackendError::Auth(message));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Create an account and sign in.
    ///
    /// Assumes the project auto-confirms email addresses; deployments that
    /// require confirmation return no immediate session and the call fails.
    ///
    /// # Errors
    ///
    /// Returns an error if GoTrue rejects the credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let result = self
            .auth_post(
                self.auth_url("signup"),
                &[],
                json!({ "email": email, "password": password }),
            )
            .await;

        let result = match result {
            Ok(token) => self.install_session(token).await,
            Err(err) => Err(err),
        };
        self.surface(result, "Could not create your account.")
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if GoTrue rejects the credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let result = self
            .auth_post(
                self.auth_url("token"),
                &[("grant_type", "password")],
                json!({ "email": email, "password": password }),
            )
            .await;

        let result = match result {
            Ok(token) => self.install_session(token).await,
            Err(err) => Err(err),
        };
        self.surface(result, "Could not sign in.")
    }

    async fn install_session(
        &self,
        token: TokenResponse,
    ) -> Result<AuthSession, BackendError> {
        let session = token.into_session()?;
        *self.inner.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Sign out. Token revocation is best-effort; the local session is
    /// cleared regardless.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        let token = self
            .inner
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.expose_secret().to_owned());

        if let Some(token) = token {
            let result = self
                .inner
                .http
                .post(self.auth_url("logout"))
                .header("apikey", self.inner.anon_key.expose_secret())
                .bearer_auth(token)
                .send()
                .await;
            if let Err(err) = result {
                debug!(error = %err, "logout request failed");
            }
        }

        *self.inner.session.write().await = None;
    }

    // =========================================================================
    // Product Methods (cached)
    // =========================================================================

    /// Get the full catalog, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, BackendError> {
        let result = self.get_products_inner().await;
        self.surface(result, "Could not load products.")
    }

    async fn get_products_inner(&self) -> Result<Vec<Product>, BackendError> {
        const CACHE_KEY: &str = "products:all";

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("products"))
                    .query(&[("select", "*"), ("order", "name.asc")]),
            )
            .await?;

        let rows: Vec<ProductRow> = response.json().await?;
        let products: Vec<Product> = rows.into_iter().map(convert_product).collect();

        self.inner
            .cache
            .insert(CACHE_KEY.to_owned(), CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by id. Absence is an expected outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product_by_id(
        &self,
        id: &ProductId,
    ) -> Result<Option<Product>, BackendError> {
        let result = self.fetch_single_product("id", id.as_str()).await;
        self.surface(result, "Could not load product.")
    }

    /// Get a product by slug. Absence is an expected outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Product>, BackendError> {
        let result = self.fetch_single_product("slug", slug).await;
        self.surface(result, "Could not load product.")
    }

    async fn fetch_single_product(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<Product>, BackendError> {
        let cache_key = format!("product:{column}:{value}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let filter = format!("eq.{value}");
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("products"))
                    .query(&[("select", "*"), (column, filter.as_str()), ("limit", "1")]),
            )
            .await?;

        let mut rows: Vec<ProductRow> = response.json().await?;
        let Some(row) = rows.pop() else {
            return Ok(None);
        };

        let product = convert_product(row);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(Some(product))
    }

    /// Search products by name, description, or category. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, BackendError> {
        let result = self.search_products_inner(query).await;
        self.surface(result, "Search failed.")
    }

    async fn search_products_inner(&self, query: &str) -> Result<Vec<Product>, BackendError> {
        let filter = format!(
            "(name.ilike.*{query}*,description.ilike.*{query}*,category.ilike.*{query}*)"
        );
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("products"))
                    .query(&[("select", "*"), ("or", filter.as_str())]),
            )
            .await?;

        let rows: Vec<ProductRow> = response.json().await?;
        Ok(rows.into_iter().map(convert_product).collect())
    }

    /// Invalidate all cached product data.
    pub async fn invalidate_products(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    // =========================================================================
    // Cart Methods (user-scoped, not cached - mutable state)
    // =========================================================================

    /// Get the signed-in user's cart rows. Anonymous visitors get an empty
    /// cart rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, BackendError> {
        let result = self.get_cart_inner().await;
        self.surface(result, "Could not load your cart.")
    }

    async fn get_cart_inner(&self) -> Result<Vec<CartItem>, BackendError> {
        let Some(user_id) = self.current_user_id().await else {
            return Ok(Vec::new());
        };

        let filter = format!("eq.{}", user_id.as_str());
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("cart"))
                    .query(&[
                        ("select", "*"),
                        ("user_id", filter.as_str()),
                        ("order", "created_at.asc"),
                    ]),
            )
            .await?;

        let rows: Vec<CartItemRow> = response.json().await?;
        Ok(rows.into_iter().map(convert_cart_item).collect())
    }

    /// Add a product to the cart, or bump the quantity of its existing row.
    /// At most one row exists per (user, product).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self, product), fields(product_id = %product.id, quantity))]
    pub async fn add_cart_item(
        &self,
        product: &Product,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let result = self.add_cart_item_inner(product, quantity).await;
        self.surface(result, "Could not update your cart.")
    }

    async fn add_cart_item_inner(
        &self,
        product: &Product,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let existing = self
            .get_cart_inner()
            .await?
            .into_iter()
            .find(|item| item.product_id == product.id);

        match existing {
            Some(item) => {
                self.update_cart_item_inner(&item.id, item.quantity + quantity)
                    .await
            }
            None => {
                let payload = NewCartItemRow {
                    user_id: user_id.into_inner(),
                    product_id: product.id.as_str().to_owned(),
                    quantity,
                    product: product_to_row(product),
                };
                self.send(self.inner.http.post(self.rest_url("cart")).json(&payload))
                    .await?;
                Ok(())
            }
        }
    }

    /// Set the quantity of a cart row.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self), fields(id = %id, quantity))]
    pub async fn update_cart_item(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let result = self.update_cart_item_inner(id, quantity).await;
        self.surface(result, "Could not update your cart.")
    }

    async fn update_cart_item_inner(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let id_filter = format!("eq.{}", id.as_str());
        let user_filter = format!("eq.{}", user_id.as_str());
        self.send(
            self.inner
                .http
                .patch(self.rest_url("cart"))
                .query(&[
                    ("id", id_filter.as_str()),
                    ("user_id", user_filter.as_str()),
                ])
                .json(&json!({ "quantity": quantity })),
        )
        .await?;

        Ok(())
    }

    /// Delete a cart row.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove_cart_item(&self, id: &CartItemId) -> Result<(), BackendError> {
        let result = self.remove_cart_item_inner(id).await;
        self.surface(result, "Could not update your cart.")
    }

    async fn remove_cart_item_inner(&self, id: &CartItemId) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let id_filter = format!("eq.{}", id.as_str());
        let user_filter = format!("eq.{}", user_id.as_str());
        self.send(
            self.inner
                .http
                .delete(self.rest_url("cart"))
                .query(&[
                    ("id", id_filter.as_str()),
                    ("user_id", user_filter.as_str()),
                ]),
        )
        .await?;

        Ok(())
    }

    /// Delete every cart row for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), BackendError> {
        let result = self.clear_cart_inner().await;
        self.surface(result, "Could not update your cart.")
    }

    async fn clear_cart_inner(&self) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let user_filter = format!("eq.{}", user_id.as_str());
        self.send(
            self.inner
                .http
                .delete(self.rest_url("cart"))
                .query(&[("user_id", user_filter.as_str())]),
        )
        .await?;

        Ok(())
    }

    // =========================================================================
    // Wishlist Methods (user-scoped, not cached - mutable state)
    // =========================================================================

    /// Get the signed-in user's wishlist rows. Anonymous visitors get an
    /// empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, BackendError> {
        let result = self.get_wishlist_inner().await;
        self.surface(result, "Could not load your wishlist.")
    }

    async fn get_wishlist_inner(&self) -> Result<Vec<WishlistItem>, BackendError> {
        let Some(user_id) = self.current_user_id().await else {
            return Ok(Vec::new());
        };

        let filter = format!("eq.{}", user_id.as_str());
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("wishlist"))
                    .query(&[("select", "*"), ("user_id", filter.as_str())]),
            )
            .await?;

        let rows: Vec<WishlistItemRow> = response.json().await?;
        Ok(rows.into_iter().map(convert_wishlist_item).collect())
    }

    /// Add a product to the wishlist. Already-present products are left
    /// alone; at most one row exists per (user, product).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_wishlist_item(&self, product: &Product) -> Result<(), BackendError> {
        let result = self.add_wishlist_item_inner(product).await;
        self.surface(result, "Could not update your wishlist.")
    }

    async fn add_wishlist_item_inner(&self, product: &Product) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let already_present = self
            .get_wishlist_inner()
            .await?
            .iter()
            .any(|item| item.product_id == product.id);
        if already_present {
            return Ok(());
        }

        let payload = NewWishlistItemRow {
            user_id: user_id.into_inner(),
            product_id: product.id.as_str().to_owned(),
            product: product_to_row(product),
        };
        self.send(
            self.inner
                .http
                .post(self.rest_url("wishlist"))
                .json(&payload),
        )
        .await?;

        Ok(())
    }

    /// Delete a wishlist row.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove_wishlist_item(&self, id: &WishlistItemId) -> Result<(), BackendError> {
        let result = self.remove_wishlist_item_inner(id).await;
        self.surface(result, "Could not update your wishlist.")
    }

    async fn remove_wishlist_item_inner(
        &self,
        id: &WishlistItemId,
    ) -> Result<(), BackendError> {
        let user_id = self.require_user().await?;

        let id_filter = format!("eq.{}", id.as_str());
        let user_filter = format!("eq.{}", user_id.as_str());
        self.send(
            self.inner
                .http
                .delete(self.rest_url("wishlist"))
                .query(&[
                    ("id", id_filter.as_str()),
                    ("user_id", user_filter.as_str()),
                ]),
        )
        .await?;

        Ok(())
    }

    // =========================================================================
    // Order Methods (user-scoped, not cached)
    // =========================================================================

    /// Persist a new order and return the created row.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::LoginRequired`] without a signed-in user, or
    /// an error if the request fails.
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, BackendError> {
        let result = self.create_order_inner(order).await;
        self.surface(result, "Could not place your order.")
    }

    async fn create_order_inner(&self, order: &NewOrder) -> Result<Order, BackendError> {
        let user_id = self.require_user().await?;

        let payload = new_order_to_row(user_id.as_str(), order);
        let response = self
            .send(
                self.inner
                    .http
                    .post(self.rest_url("orders"))
                    .header("Prefer", "return=representation")
                    .json(&payload),
            )
            .await?;

        let mut rows: Vec<OrderRow> = response.json().await?;
        let row = rows.pop().ok_or_else(|| BackendError::Api {
            status: 200,
            message: "order insert returned no row".to_owned(),
        })?;

        Ok(convert_order(row))
    }

    /// Get the signed-in user's orders, newest first. Anonymous visitors get
    /// an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, BackendError> {
        let result = self.get_orders_inner().await;
        self.surface(result, "Could not load your orders.")
    }

    async fn get_orders_inner(&self) -> Result<Vec<Order>, BackendError> {
        let Some(user_id) = self.current_user_id().await else {
            return Ok(Vec::new());
        };

        let filter = format!("eq.{}", user_id.as_str());
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("orders"))
                    .query(&[
                        ("select", "*"),
                        ("user_id", filter.as_str()),
                        ("order", "created_at.desc"),
                    ]),
            )
            .await?;

        let rows: Vec<OrderRow> = response.json().await?;
        Ok(rows.into_iter().map(convert_order).collect())
    }

    /// Get one of the signed-in user's orders by id. Absence is an expected
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, BackendError> {
        let result = self.get_order_inner(id).await;
        self.surface(result, "Could not load your order.")
    }

    async fn get_order_inner(&self, id: &OrderId) -> Result<Option<Order>, BackendError> {
        let Some(user_id) = self.current_user_id().await else {
            return Ok(None);
        };

        let id_filter = format!("eq.{}", id.as_str());
        let user_filter = format!("eq.{}", user_id.as_str());
        let response = self
            .send(
                self.inner
                    .http
                    .get(self.rest_url("orders"))
                    .query(&[
                        ("select", "*"),
                        ("id", id_filter.as_str()),
                        ("user_id", user_filter.as_str()),
                        ("limit", "1"),
                    ]),
            )
            .await?;

        let mut rows: Vec<OrderRow> = response.json().await?;
        Ok(rows.pop().map(convert_order))
    }
}

// =============================================================================
// Store seam
// =============================================================================

#[async_trait::async_trait]
impl StorefrontBackend for SupabaseClient {
    async fn get_cart(&self) -> Result<Vec<CartItem>, BackendError> {
        Self::get_cart(self).await
    }

    async fn add_cart_item(&self, product: &Product, quantity: u32) -> Result<(), BackendError> {
        Self::add_cart_item(self, product, quantity).await
    }

    async fn update_cart_item(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        Self::update_cart_item(self, id, quantity).await
    }

    async fn remove_cart_item(&self, id: &CartItemId) -> Result<(), BackendError> {
        Self::remove_cart_item(self, id).await
    }

    async fn clear_cart(&self) -> Result<(), BackendError> {
        Self::clear_cart(self).await
    }

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, BackendError> {
        Self::get_wishlist(self).await
    }

    async fn add_wishlist_item(&self, product: &Product) -> Result<(), BackendError> {
        Self::add_wishlist_item(self, product).await
    }

    async fn remove_wishlist_item(&self, id: &WishlistItemId) -> Result<(), BackendError> {
        Self::remove_wishlist_item(self, id).await
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, BackendError> {
        Self::create_order(self, &order).await
    }
}
