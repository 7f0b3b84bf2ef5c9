//! Sample catalog entries used by the test suites.

use rewired_core::{Condition, Price, ProductId};
use rust_decimal::Decimal;

use crate::supabase::types::Product;

/// A mid-range tablet priced under the default filter bounds.
#[must_use]
pub fn tablet() -> Product {
    Product {
        id: ProductId::new("prod-tab-01"),
        slug: "slate-pad-11".to_string(),
        name: "Slate Pad 11".to_string(),
        description: "11-inch tablet with a 120Hz display.".to_string(),
        images: vec!["https://cdn.rewired.shop/slate-pad-11/front.jpg".to_string()],
        price: Price::from(250),
        compare_at_price: Some(Price::from(329)),
        category: "Tablets".to_string(),
        brand: "Slate".to_string(),
        color: "Gray".to_string(),
        condition: Condition::LikeNew,
        memory: "128GB".to_string(),
        screen_size: "11\"".to_string(),
        inventory: 12,
        rating: 4.5,
        is_active: true,
    }
}

/// A premium tablet priced above 300.
#[must_use]
pub fn pro_tablet() -> Product {
    Product {
        id: ProductId::new("prod-tab-02"),
        slug: "slate-pad-pro-13".to_string(),
        name: "Slate Pad Pro 13".to_string(),
        description: "13-inch tablet for creative work.".to_string(),
        images: vec!["https://cdn.rewired.shop/slate-pad-pro-13/front.jpg".to_string()],
        price: Price::from(899),
        compare_at_price: None,
        category: "Tablets".to_string(),
        brand: "Slate".to_string(),
        color: "Silver".to_string(),
        condition: Condition::New,
        memory: "256GB".to_string(),
        screen_size: "13\"".to_string(),
        inventory: 4,
        rating: 4.8,
        is_active: true,
    }
}

/// A phone fixture.
#[must_use]
pub fn phone() -> Product {
    Product {
        id: ProductId::new("prod-ph-01"),
        slug: "volt-one".to_string(),
        name: "Volt One".to_string(),
        description: "Compact phone, open-box unit.".to_string(),
        images: vec!["https://cdn.rewired.shop/volt-one/front.jpg".to_string()],
        price: Price::new(Decimal::new(19999, 2)),
        compare_at_price: Some(Price::new(Decimal::new(24999, 2))),
        category: "Phones".to_string(),
        brand: "Volt".to_string(),
        color: "Black".to_string(),
        condition: Condition::OpenBox,
        memory: "64GB".to_string(),
        screen_size: "6.1\"".to_string(),
        inventory: 3,
        rating: 4.1,
        is_active: true,
    }
}

/// A laptop fixture.
#[must_use]
pub fn laptop() -> Product {
    Product {
        id: ProductId::new("prod-lap-01"),
        slug: "forge-book-14".to_string(),
        name: "Forge Book 14".to_string(),
        description: "14-inch ultrabook.".to_string(),
        images: vec!["https://cdn.rewired.shop/forge-book-14/front.jpg".to_string()],
        price: Price::from(1199),
        compare_at_price: None,
        category: "Laptops".to_string(),
        brand: "Forge".to_string(),
        color: "Space Gray".to_string(),
        condition: Condition::New,
        memory: "512GB".to_string(),
        screen_size: "14\"".to_string(),
        inventory: 7,
        rating: 4.7,
        is_active: true,
    }
}

/// An out-of-stock accessory.
#[must_use]
pub fn headphones() -> Product {
    Product {
        id: ProductId::new("prod-aud-01"),
        slug: "hush-buds".to_string(),
        name: "Hush Buds".to_string(),
        description: "Noise-cancelling earbuds.".to_string(),
        images: Vec::new(),
        price: Price::new(Decimal::new(8950, 2)),
        compare_at_price: None,
        category: "Audio".to_string(),
        brand: "Hush".to_string(),
        color: "White".to_string(),
        condition: Condition::New,
        memory: String::new(),
        screen_size: String::new(),
        inventory: 0,
        rating: 3.9,
        is_active: true,
    }
}

/// The five-product sample catalog (two tablets, one under 300).
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![tablet(), pro_tablet(), phone(), laptop(), headphones()]
}
