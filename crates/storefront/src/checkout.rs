//! The linear checkout flow.
//!
//! `Cart → Shipping → Payment → Confirmation`, strictly in order, with no
//! backward transition out of Confirmation. The embedding UI only renders
//! the flow for a non-empty cart; advancing past Shipping validates the
//! form, and advancing past Payment places the order.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use rewired_core::{Email, EmailError, OrderStatus, PaymentMethod, Price, ShippingMethod};

use crate::stores::{CartStore, StorefrontBackend};
use crate::supabase::BackendError;
use crate::supabase::types::{CustomerInfo, NewOrder, Order, OrderItem};

/// Flat tax applied to the subtotal.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 8%
}

/// Shipping cost for a method.
#[must_use]
pub fn shipping_cost(method: ShippingMethod) -> Price {
    match method {
        ShippingMethod::Standard => Price::new(Decimal::new(599, 2)),
        ShippingMethod::Express => Price::new(Decimal::new(1299, 2)),
        ShippingMethod::Overnight => Price::new(Decimal::new(2499, 2)),
    }
}

/// Tax on a subtotal, rounded to two decimals.
#[must_use]
pub fn tax(subtotal: Price) -> Price {
    Price::new((subtotal.amount() * tax_rate()).round_dp(2))
}

/// `subtotal + shipping + tax`.
#[must_use]
pub fn order_total(subtotal: Price, method: ShippingMethod) -> Price {
    subtotal + shipping_cost(method) + tax(subtotal)
}

/// Display order number: current millis plus a random suffix.
/// Collision-resistant for display purposes, not globally unique.
fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("ORD-{millis}-{suffix:04}")
}

/// Where the shopper is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Cart,
    Shipping,
    Payment,
    Confirmation,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Shipping => write!(f, "shipping"),
            Self::Payment => write!(f, "payment"),
            Self::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// Errors surfaced by the flow, one at a time.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required field is empty; the first missing field wins.
    #[error("Please fill in your {0}")]
    MissingField(&'static str),

    /// The email is structurally invalid.
    #[error("Please enter a valid email")]
    InvalidEmail(#[from] EmailError),

    /// The requested transition is not valid from the current step.
    #[error("checkout is not at the {expected} step")]
    WrongStep {
        /// The step the operation requires.
        expected: CheckoutStep,
    },

    /// Order placement failed; the flow stays on Payment.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// The shipping and payment details collected during checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Check required-field presence (in display order, first missing wins),
    /// then the email's structure.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        for (value, label) in [
            (&self.first_name, "first name"),
            (&self.last_name, "last name"),
            (&self.email, "email"),
            (&self.phone, "phone"),
            (&self.address, "address"),
            (&self.city, "city"),
            (&self.state, "state"),
            (&self.zip_code, "zip code"),
            (&self.country, "country"),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(label));
            }
        }

        Email::parse(&self.email)?;
        Ok(())
    }

    fn customer(&self) -> Result<CustomerInfo, CheckoutError> {
        Ok(CustomerInfo {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: Email::parse(&self.email)?,
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
        })
    }
}

/// The checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    /// The form the UI binds its inputs to.
    pub form: CheckoutForm,
    placed: Option<Order>,
}

impl CheckoutFlow {
    /// Start a new flow at the cart step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Advance `Cart → Shipping`. Unconditional; an empty cart is a
    /// render-time precondition of the embedding UI.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] away from the cart step.
    pub fn proceed_to_shipping(&mut self) -> Result<(), CheckoutError> {
        if self.step() != CheckoutStep::Cart {
            return Err(CheckoutError::WrongStep {
                expected: CheckoutStep::Cart,
            });
        }
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Advance `Shipping → Payment`, gated on form validation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] away from the shipping step, or
    /// the first validation failure.
    pub fn proceed_to_payment(&mut self) -> Result<(), CheckoutError> {
        if self.step() != CheckoutStep::Shipping {
            return Err(CheckoutError::WrongStep {
                expected: CheckoutStep::Shipping,
            });
        }
        self.form.validate()?;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Step backward. Confirmation is terminal; `back` from Cart or
    /// Confirmation is a no-op.
    pub fn back(&mut self) {
        self.step = match self.step() {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Shipping => CheckoutStep::Cart,
            other @ (CheckoutStep::Cart | CheckoutStep::Confirmation) => other,
        };
    }

    /// Place the order and advance `Payment → Confirmation`.
    ///
    /// Builds the order payload from the cart's current rows (per-line price
    /// snapshots, a client-generated order number, the derived total),
    /// persists it, clears the cart, then advances. On failure the flow
    /// stays on Payment and the error is surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] away from the payment step, a
    /// validation error for a tampered form, or the gateway failure.
    pub async fn place_order(
        &mut self,
        backend: &dyn StorefrontBackend,
        cart: &CartStore,
    ) -> Result<Order, CheckoutError> {
        if self.step() != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep {
                expected: CheckoutStep::Payment,
            });
        }

        let customer = self.form.customer()?;
        let items: Vec<OrderItem> = cart
            .items()
            .await
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                product_name: item.product.name.clone(),
                quantity: item.quantity,
                price: item.product.price,
                image: item
                    .product
                    .featured_image()
                    .unwrap_or("/placeholder.png")
                    .to_owned(),
            })
            .collect();
        let subtotal = cart.total().await;

        let new_order = NewOrder {
            order_number: generate_order_number(),
            items,
            total: order_total(subtotal, self.form.shipping_method),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            customer,
            shipping_method: self.form.shipping_method,
            payment_method: self.form.payment_method,
        };

        let order = backend.create_order(new_order).await?;
        cart.clear().await?;

        self.placed = Some(order.clone());
        self.step = CheckoutStep::Confirmation;
        Ok(order)
    }

    /// The order placed by this flow, once confirmed.
    #[must_use]
    pub const fn placed_order(&self) -> Option<&Order> {
        self.placed.as_ref()
    }
}
