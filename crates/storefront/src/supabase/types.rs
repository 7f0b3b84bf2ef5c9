//! Domain types for the storefront.
//!
//! These types provide a clean, typed API separate from the raw row shapes
//! the backend persists (see `supabase::rows`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rewired_core::{
    CartItemId, Condition, Email, OrderId, OrderStatus, PaymentMethod, Price, ProductId,
    ShippingMethod, WishlistItemId,
};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Read-only from the storefront's perspective; the catalog is maintained by
/// an external process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// Ordered image URLs; the first is the featured image.
    pub images: Vec<String>,
    /// Current price.
    pub price: Price,
    /// Original price when on sale. Not required to exceed `price`; display
    /// logic simply shows no discount when it doesn't.
    pub compare_at_price: Option<Price>,
    /// Category name (e.g., "Tablets").
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Color variant.
    pub color: String,
    /// Physical condition.
    pub condition: Condition,
    /// Memory variant (e.g., "256GB").
    pub memory: String,
    /// Screen size variant (e.g., "13\"").
    pub screen_size: String,
    /// Units in stock.
    pub inventory: u32,
    /// Average review rating.
    pub rating: f64,
    /// Whether the product is listed.
    pub is_active: bool,
}

impl Product {
    /// Whether any stock remains.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.inventory > 0
    }

    /// Featured image URL, if any image exists.
    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whole-percent discount against `compare_at_price`.
    ///
    /// Returns `None` when there is no compare-at price or it does not
    /// exceed the current price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let compare_at = self.compare_at_price?;
        if compare_at <= self.price {
            return None;
        }

        let fraction = (compare_at - self.price).amount() / compare_at.amount();
        u32::try_from((fraction * Decimal::from(100)).round().mantissa()).ok()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the user's cart: one product, one quantity.
///
/// Carries a snapshot of the product taken at add time, so line totals stay
/// stable even if the catalog price changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Row ID, distinct from the product ID.
    pub id: CartItemId,
    /// The referenced product.
    pub product_id: ProductId,
    /// Positive quantity.
    pub quantity: u32,
    /// Product snapshot taken at add time.
    pub product: Product,
}

impl CartItem {
    /// Snapshot price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// A saved product on the user's wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Row ID, distinct from the product ID.
    pub id: WishlistItemId,
    /// The referenced product.
    pub product_id: ProductId,
    /// Product snapshot taken at add time.
    pub product: Product,
}

// =============================================================================
// Orders
// =============================================================================

/// A line on a placed order. Copied, not referenced: later catalog changes
/// never alter historical orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at order time.
    pub price: Price,
    /// One representative image URL.
    pub image: String,
}

/// Customer and shipping metadata captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A placed order. Created exactly once at checkout; never mutated by this
/// application afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned row ID.
    pub id: OrderId,
    /// Client-generated display number (e.g., `ORD-1722800000000-0421`).
    pub order_number: String,
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// Grand total (subtotal + shipping + tax) at order time.
    pub total: Price,
    /// Lifecycle status; transitions happen out of band.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Customer metadata, when captured.
    pub customer: Option<CustomerInfo>,
    /// Selected shipping method, when captured.
    pub shipping_method: Option<ShippingMethod>,
    /// Selected payment method, when captured.
    pub payment_method: Option<PaymentMethod>,
}

/// Payload for creating an order: [`Order`] minus the backend-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerInfo,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::fixtures;

    use super::*;

    #[test]
    fn test_discount_percent_requires_higher_compare_at() {
        let mut product = fixtures::tablet();
        product.price = Price::from(250);
        product.compare_at_price = Some(Price::from(500));
        assert_eq!(product.discount_percent(), Some(50));

        // compare-at below price: tolerated, just no badge
        product.compare_at_price = Some(Price::from(200));
        assert_eq!(product.discount_percent(), None);

        product.compare_at_price = None;
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_line_total_uses_snapshot_price() {
        let item = CartItem {
            id: CartItemId::new("ci-1"),
            product_id: fixtures::tablet().id,
            quantity: 3,
            product: fixtures::tablet(),
        };
        assert_eq!(item.line_total(), fixtures::tablet().price.times(3));
    }

    #[test]
    fn test_featured_image() {
        let mut product = fixtures::tablet();
        assert!(product.featured_image().is_some());
        product.images.clear();
        assert_eq!(product.featured_image(), None);
    }
}
