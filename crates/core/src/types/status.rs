//! Commerce enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The storefront only ever writes `Pending` at order creation; later
/// transitions happen out of band in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Physical condition of a listed device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    #[serde(rename = "Open Box")]
    OpenBox,
}

impl Condition {
    /// Display label, matching the persisted value.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Like New",
            Self::OpenBox => "Open Box",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Like New" => Ok(Self::LikeNew),
            "Open Box" => Ok(Self::OpenBox),
            _ => Err(format!("invalid condition: {s}")),
        }
    }
}

/// Shipping method selected during checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl std::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Express => write!(f, "express"),
            Self::Overnight => write!(f, "overnight"),
        }
    }
}

/// Payment method selected during checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "paypal")]
    Paypal,
    #[serde(rename = "bank-transfer")]
    BankTransfer,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_condition_round_trips_persisted_labels() {
        for (condition, label) in [
            (Condition::New, "\"New\""),
            (Condition::LikeNew, "\"Like New\""),
            (Condition::OpenBox, "\"Open Box\""),
        ] {
            assert_eq!(serde_json::to_string(&condition).unwrap(), label);
            let back: Condition = serde_json::from_str(label).unwrap();
            assert_eq!(back, condition);
        }
    }

    #[test]
    fn test_condition_from_str_rejects_unknown() {
        assert!("Refurbished".parse::<Condition>().is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"credit-card\""
        );
    }
}
