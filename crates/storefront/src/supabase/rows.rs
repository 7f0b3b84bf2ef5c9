//! Persisted row shapes and their conversions to domain types.
//!
//! PostgREST returns snake_case columns with nullable text and numeric
//! fields; each entity has exactly one conversion here so the persisted
//! shape never leaks past the gateway boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rewired_core::{
    CartItemId, Email, OrderId, OrderStatus, PaymentMethod, Price, ProductId, ShippingMethod,
    WishlistItemId,
};

use super::types::{
    CartItem, CustomerInfo, NewOrder, Order, OrderItem, Product, WishlistItem,
};

// =============================================================================
// Products
// =============================================================================

/// A row of the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub memory: Option<String>,
    pub screen_size: Option<String>,
    pub inventory: Option<i64>,
    pub rating: Option<f64>,
    pub is_active: Option<bool>,
}

/// Convert a product row, defaulting the nullable columns.
pub fn convert_product(row: ProductRow) -> Product {
    Product {
        id: ProductId::new(row.id),
        slug: row.slug,
        name: row.name,
        description: row.description.unwrap_or_default(),
        images: row.images.unwrap_or_default(),
        price: Price::new(row.price),
        compare_at_price: row.compare_at_price.map(Price::new),
        category: row.category.unwrap_or_default(),
        brand: row.brand.unwrap_or_default(),
        color: row.color.unwrap_or_default(),
        condition: row
            .condition
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        memory: row.memory.unwrap_or_default(),
        screen_size: row.screen_size.unwrap_or_default(),
        inventory: row
            .inventory
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        rating: row.rating.unwrap_or(0.0),
        is_active: row.is_active.unwrap_or(true),
    }
}

/// Build the row shape for persisting a product snapshot into a jsonb column.
pub fn product_to_row(product: &Product) -> ProductRow {
    ProductRow {
        id: product.id.as_str().to_owned(),
        slug: product.slug.clone(),
        name: product.name.clone(),
        description: Some(product.description.clone()),
        images: Some(product.images.clone()),
        price: product.price.amount(),
        compare_at_price: product.compare_at_price.map(|p| p.amount()),
        category: Some(product.category.clone()),
        brand: Some(product.brand.clone()),
        color: Some(product.color.clone()),
        condition: Some(product.condition.label().to_owned()),
        memory: Some(product.memory.clone()),
        screen_size: Some(product.screen_size.clone()),
        inventory: Some(i64::from(product.inventory)),
        rating: Some(product.rating),
        is_active: Some(product.is_active),
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A row of the `cart` table. The `product` column is a jsonb snapshot taken
/// at add time.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRow {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub product: ProductRow,
}

/// Insert payload for a new cart row.
#[derive(Debug, Serialize)]
pub struct NewCartItemRow {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub product: ProductRow,
}

pub fn convert_cart_item(row: CartItemRow) -> CartItem {
    CartItem {
        id: CartItemId::new(row.id),
        product_id: ProductId::new(row.product_id),
        quantity: row.quantity,
        product: convert_product(row.product),
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// A row of the `wishlist` table.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistItemRow {
    pub id: String,
    pub product_id: String,
    pub product: ProductRow,
}

/// Insert payload for a new wishlist row.
#[derive(Debug, Serialize)]
pub struct NewWishlistItemRow {
    pub user_id: String,
    pub product_id: String,
    pub product: ProductRow,
}

pub fn convert_wishlist_item(row: WishlistItemRow) -> WishlistItem {
    WishlistItem {
        id: WishlistItemId::new(row.id),
        product_id: ProductId::new(row.product_id),
        product: convert_product(row.product),
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A line of an order's `items` jsonb column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRow {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub image: String,
}

/// Customer metadata persisted on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfoRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A row of the `orders` table.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    pub id: String,
    pub order_number: String,
    pub items: Vec<OrderItemRow>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer_info: Option<CustomerInfoRow>,
    pub shipping_method: Option<ShippingMethod>,
    pub payment_method: Option<PaymentMethod>,
}

/// Insert payload for a new order row.
#[derive(Debug, Serialize)]
pub struct NewOrderRow {
    pub user_id: String,
    pub order_number: String,
    pub items: Vec<OrderItemRow>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer_info: CustomerInfoRow,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

fn convert_order_item(row: OrderItemRow) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(row.product_id),
        product_name: row.product_name,
        quantity: row.quantity,
        price: Price::new(row.price),
        image: row.image,
    }
}

fn order_item_to_row(item: &OrderItem) -> OrderItemRow {
    OrderItemRow {
        product_id: item.product_id.as_str().to_owned(),
        product_name: item.product_name.clone(),
        quantity: item.quantity,
        price: item.price.amount(),
        image: item.image.clone(),
    }
}

/// Convert an order row. Customer metadata with an unparseable email is
/// dropped rather than failing the whole fetch; orders predate the current
/// validation rules.
pub fn convert_order(row: OrderRow) -> Order {
    let customer = row.customer_info.and_then(|info| {
        let email = Email::parse(&info.email).ok()?;
        Some(CustomerInfo {
            first_name: info.first_name,
            last_name: info.last_name,
            email,
            phone: info.phone,
            address: info.address,
            city: info.city,
            state: info.state,
            zip_code: info.zip_code,
            country: info.country,
        })
    });

    Order {
        id: OrderId::new(row.id),
        order_number: row.order_number,
        items: row.items.into_iter().map(convert_order_item).collect(),
        total: Price::new(row.total),
        status: row.status,
        created_at: row.created_at,
        customer,
        shipping_method: row.shipping_method,
        payment_method: row.payment_method,
    }
}

/// Build the insert payload for order creation.
pub fn new_order_to_row(user_id: &str, order: &NewOrder) -> NewOrderRow {
    NewOrderRow {
        user_id: user_id.to_owned(),
        order_number: order.order_number.clone(),
        items: order.items.iter().map(order_item_to_row).collect(),
        total: order.total.amount(),
        status: order.status,
        created_at: order.created_at,
        customer_info: CustomerInfoRow {
            first_name: order.customer.first_name.clone(),
            last_name: order.customer.last_name.clone(),
            email: order.customer.email.as_str().to_owned(),
            phone: order.customer.phone.clone(),
            address: order.customer.address.clone(),
            city: order.customer.city.clone(),
            state: order.customer.state.clone(),
            zip_code: order.customer.zip_code.clone(),
            country: order.customer.country.clone(),
        },
        shipping_method: order.shipping_method,
        payment_method: order.payment_method,
    }
}
