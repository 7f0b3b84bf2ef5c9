//! End-to-end store and checkout behavior against an in-memory backend
//! with failure injection.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rewired_core::{
    CartItemId, OrderId, PaymentMethod, Price, ShippingMethod, WishlistItemId,
};
use rewired_storefront::checkout::{CheckoutFlow, CheckoutStep};
use rewired_storefront::fixtures;
use rewired_storefront::notifications::Notifier;
use rewired_storefront::stores::{CartStore, StorefrontBackend, WishlistStore};
use rewired_storefront::supabase::BackendError;
use rewired_storefront::supabase::types::{CartItem, NewOrder, Order, Product, WishlistItem};

// =============================================================================
// Fake backend
// =============================================================================

#[derive(Default)]
struct FakeState {
    cart: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    orders: Vec<Order>,
    next_row: u32,
    fail_writes: bool,
    require_login: bool,
}

/// In-memory stand-in for the Supabase gateway. Enforces the same
/// one-row-per-product invariants and can be told to reject writes.
#[derive(Default)]
struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn fail_writes(&self, on: bool) {
        self.state.lock().unwrap().fail_writes = on;
    }

    fn require_login(&self, on: bool) {
        self.state.lock().unwrap().require_login = on;
    }

    fn cart_rows(&self) -> Vec<CartItem> {
        self.state.lock().unwrap().cart.clone()
    }

    fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }
}

fn check_write(state: &FakeState) -> Result<(), BackendError> {
    if state.require_login {
        return Err(BackendError::LoginRequired);
    }
    if state.fail_writes {
        return Err(BackendError::Api {
            status: 500,
            message: "injected failure".to_owned(),
        });
    }
    Ok(())
}

#[async_trait]
impl StorefrontBackend for FakeBackend {
    async fn get_cart(&self) -> Result<Vec<CartItem>, BackendError> {
        // Anonymous reads degrade to an empty collection.
        let state = self.state.lock().unwrap();
        if state.require_login {
            return Ok(Vec::new());
        }
        Ok(state.cart.clone())
    }

    async fn add_cart_item(&self, product: &Product, quantity: u32) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        state.next_row += 1;
        let id = format!("row-{}", state.next_row);
        match state
            .cart
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(item) => item.quantity += quantity,
            None => state.cart.push(CartItem {
                id: CartItemId::new(id),
                product_id: product.id.clone(),
                quantity,
                product: product.clone(),
            }),
        }
        Ok(())
    }

    async fn update_cart_item(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        if let Some(item) = state.cart.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn remove_cart_item(&self, id: &CartItemId) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        state.cart.retain(|item| &item.id != id);
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        state.cart.clear();
        Ok(())
    }

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, BackendError> {
        let state = self.state.lock().unwrap();
        if state.require_login {
            return Ok(Vec::new());
        }
        Ok(state.wishlist.clone())
    }

    async fn add_wishlist_item(&self, product: &Product) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        if state
            .wishlist
            .iter()
            .any(|item| item.product_id == product.id)
        {
            return Ok(());
        }
        state.next_row += 1;
        let id = format!("row-{}", state.next_row);
        state.wishlist.push(WishlistItem {
            id: WishlistItemId::new(id),
            product_id: product.id.clone(),
            product: product.clone(),
        });
        Ok(())
    }

    async fn remove_wishlist_item(&self, id: &WishlistItemId) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        state.wishlist.retain(|item| &item.id != id);
        Ok(())
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, BackendError> {
        let mut state = self.state.lock().unwrap();
        check_write(&state)?;

        state.next_row += 1;
        let created = Order {
            id: OrderId::new(format!("order-{}", state.next_row)),
            order_number: order.order_number,
            items: order.items,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            customer: Some(order.customer),
            shipping_method: Some(order.shipping_method),
            payment_method: Some(order.payment_method),
        };
        state.orders.push(created.clone());
        Ok(created)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn cart_with_backend() -> (Arc<FakeBackend>, CartStore) {
    let backend = FakeBackend::new();
    let cart = CartStore::new(Arc::clone(&backend) as Arc<dyn StorefrontBackend>);
    (backend, cart)
}

fn wishlist_with_backend() -> (Arc<FakeBackend>, WishlistStore, Notifier) {
    let backend = FakeBackend::new();
    let notifier = Notifier::new();
    let wishlist = WishlistStore::new(
        Arc::clone(&backend) as Arc<dyn StorefrontBackend>,
        notifier.clone(),
    );
    (backend, wishlist, notifier)
}

fn priced(mut product: Product, dollars: i64) -> Product {
    product.price = Price::from(dollars);
    product
}

fn filled_checkout(flow: &mut CheckoutFlow) {
    flow.form.first_name = "Ada".to_owned();
    flow.form.last_name = "Byron".to_owned();
    flow.form.email = "ada@rewired.shop".to_owned();
    flow.form.phone = "555-0100".to_owned();
    flow.form.address = "1 Analytical Way".to_owned();
    flow.form.city = "London".to_owned();
    flow.form.state = "LDN".to_owned();
    flow.form.zip_code = "E1 6AN".to_owned();
    flow.form.country = "UK".to_owned();
    flow.form.shipping_method = ShippingMethod::Standard;
    flow.form.payment_method = PaymentMethod::CreditCard;
}

// =============================================================================
// Cart store
// =============================================================================

#[tokio::test]
async fn repeated_adds_keep_one_row_per_product() {
    let (backend, cart) = cart_with_backend();
    let tablet = fixtures::tablet();

    cart.add_item(&tablet, 1).await.unwrap();
    cart.add_item(&tablet, 2).await.unwrap();
    cart.add_item(&fixtures::phone(), 1).await.unwrap();

    let rows = cart.items().await;
    assert_eq!(rows.len(), 2);
    let tablet_row = rows
        .iter()
        .find(|item| item.product_id == tablet.id)
        .unwrap();
    assert_eq!(tablet_row.quantity, 3);
    assert_eq!(backend.cart_rows().len(), 2);
}

#[tokio::test]
async fn worked_cart_scenario() {
    // A at $10 x2 and B at $25 x1: total 45, badge count 3. Dropping A's
    // quantity to zero removes the row: total 25, count 1.
    let (_, cart) = cart_with_backend();
    let a = priced(fixtures::tablet(), 10);
    let b = priced(fixtures::phone(), 25);

    cart.add_item(&a, 2).await.unwrap();
    cart.add_item(&b, 1).await.unwrap();
    assert_eq!(cart.total().await, Price::from(45));
    assert_eq!(cart.item_count().await, 3);

    let a_row_id = cart
        .items()
        .await
        .iter()
        .find(|item| item.product_id == a.id)
        .map(|item| item.id.clone())
        .unwrap();
    cart.update_quantity(&a_row_id, 0).await.unwrap();

    assert_eq!(cart.total().await, Price::from(25));
    assert_eq!(cart.item_count().await, 1);
    assert!(!cart.is_in_cart(&a.id).await);
}

#[tokio::test]
async fn failed_add_rolls_back_to_snapshot() {
    let (backend, cart) = cart_with_backend();
    cart.add_item(&fixtures::tablet(), 1).await.unwrap();
    let before = cart.items().await;

    backend.fail_writes(true);
    let err = cart.add_item(&fixtures::phone(), 1).await.unwrap_err();
    assert!(matches!(err, BackendError::Api { status: 500, .. }));

    assert_eq!(cart.items().await, before);
    assert!(cart.last_error().await.is_some());
    assert!(!cart.is_loading().await);
}

#[tokio::test]
async fn failed_remove_restores_the_row() {
    let (backend, cart) = cart_with_backend();
    cart.add_item(&fixtures::tablet(), 2).await.unwrap();
    cart.add_item(&fixtures::laptop(), 1).await.unwrap();
    let before = cart.items().await;

    backend.fail_writes(true);
    let target = before.first().unwrap().id.clone();
    cart.remove_item(&target).await.unwrap_err();

    assert_eq!(cart.items().await, before);
}

#[tokio::test]
async fn failed_clear_restores_every_row() {
    let (backend, cart) = cart_with_backend();
    cart.add_item(&fixtures::tablet(), 2).await.unwrap();
    let before = cart.items().await;

    backend.fail_writes(true);
    cart.clear().await.unwrap_err();

    assert_eq!(cart.items().await, before);
}

#[tokio::test]
async fn total_is_stable_when_the_catalog_price_changes() {
    let (_, cart) = cart_with_backend();
    let at_add_time = priced(fixtures::tablet(), 250);
    cart.add_item(&at_add_time, 2).await.unwrap();
    let before = cart.total().await;

    // The catalog later reprices the product; rows carry their own
    // snapshot, so a refetch must not move the total.
    let _repriced = priced(fixtures::tablet(), 999);
    cart.fetch_cart().await.unwrap();

    assert_eq!(cart.total().await, before);
    assert_eq!(before, Price::from(500));
}

#[tokio::test]
async fn rapid_double_add_lands_on_quantity_two() {
    let (backend, cart) = cart_with_backend();
    let tablet = fixtures::tablet();

    let (first, second) = tokio::join!(cart.add_item(&tablet, 1), cart.add_item(&tablet, 1));
    first.unwrap();
    second.unwrap();

    let rows = backend.cart_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.first().unwrap().quantity, 2);
    assert_eq!(cart.item_count().await, 2);
}

#[tokio::test]
async fn anonymous_visitor_degrades_to_empty_cart_but_cannot_write() {
    let (backend, cart) = cart_with_backend();
    backend.require_login(true);

    // Reads fall back to an empty collection.
    cart.fetch_cart().await.unwrap();
    assert!(cart.items().await.is_empty());

    // Writes fail fast with the distinguishable login condition.
    let err = cart.add_item(&fixtures::tablet(), 1).await.unwrap_err();
    assert!(err.is_login_required());
    assert!(cart.items().await.is_empty());
}

// =============================================================================
// Wishlist store
// =============================================================================

#[tokio::test]
async fn wishlist_toggle_is_idempotent() {
    let (backend, wishlist, notifier) = wishlist_with_backend();
    let tablet = fixtures::tablet();

    wishlist.add(&tablet).await.unwrap();
    assert!(notifier.drain().is_empty());

    // The second add is a notified no-op, not an error.
    wishlist.add(&tablet).await.unwrap();

    assert_eq!(wishlist.item_count().await, 1);
    assert_eq!(backend.state.lock().unwrap().wishlist.len(), 1);
    let drained = notifier.drain();
    assert_eq!(drained.len(), 1);
    assert!(drained[0].message.contains("already in your wishlist"));
}

#[tokio::test]
async fn failed_wishlist_add_rolls_back() {
    let (backend, wishlist, _) = wishlist_with_backend();

    backend.fail_writes(true);
    wishlist.add(&fixtures::tablet()).await.unwrap_err();

    assert_eq!(wishlist.item_count().await, 0);
    assert!(wishlist.last_error().await.is_some());
}

#[tokio::test]
async fn wishlist_remove_then_membership() {
    let (_, wishlist, _) = wishlist_with_backend();
    let tablet = fixtures::tablet();

    wishlist.add(&tablet).await.unwrap();
    assert!(wishlist.is_in_wishlist(&tablet.id).await);

    wishlist.remove(&tablet.id).await.unwrap();
    assert!(!wishlist.is_in_wishlist(&tablet.id).await);
    assert_eq!(wishlist.item_count().await, 0);
}

// =============================================================================
// Checkout flow
// =============================================================================

#[tokio::test]
async fn placing_an_order_snapshots_lines_and_clears_the_cart() {
    let (backend, cart) = cart_with_backend();
    cart.add_item(&priced(fixtures::tablet(), 10), 2).await.unwrap();
    cart.add_item(&priced(fixtures::phone(), 25), 1).await.unwrap();

    let mut flow = CheckoutFlow::new();
    flow.proceed_to_shipping().unwrap();
    filled_checkout(&mut flow);
    flow.proceed_to_payment().unwrap();

    let order = flow.place_order(backend.as_ref(), &cart).await.unwrap();

    // 45 subtotal + 5.99 standard shipping + 3.60 tax.
    assert_eq!(order.total, Price::from_cents(5459));
    assert_eq!(order.items.len(), 2);
    assert!(order.order_number.starts_with("ORD-"));
    assert_eq!(flow.step(), CheckoutStep::Confirmation);
    assert_eq!(flow.placed_order().unwrap().id, order.id);

    assert_eq!(backend.orders().len(), 1);
    assert!(backend.cart_rows().is_empty());
    assert!(cart.items().await.is_empty());
}

#[tokio::test]
async fn failed_placement_stays_on_payment() {
    let (backend, cart) = cart_with_backend();
    cart.add_item(&priced(fixtures::tablet(), 10), 1).await.unwrap();

    let mut flow = CheckoutFlow::new();
    flow.proceed_to_shipping().unwrap();
    filled_checkout(&mut flow);
    flow.proceed_to_payment().unwrap();

    backend.fail_writes(true);
    flow.place_order(backend.as_ref(), &cart).await.unwrap_err();

    assert_eq!(flow.step(), CheckoutStep::Payment);
    assert!(flow.placed_order().is_none());
    assert!(backend.orders().is_empty());
    assert_eq!(cart.item_count().await, 1);
}
