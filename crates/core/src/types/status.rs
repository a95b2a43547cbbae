//! Status and tag enums shared by the storefront.

use serde::{Deserialize, Serialize};

/// How the customer chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// UPI transfer.
    Upi,
    /// Digital wallet.
    Wallet,
    /// Razorpay hosted checkout.
    Razorpay,
    /// `PhonePe` pay page.
    PhonePe,
}

impl PaymentMethod {
    /// Prefix of the payment identifier a processor hands back for this method.
    #[must_use]
    pub const fn result_prefix(&self) -> &'static str {
        match self {
            Self::Card | Self::Upi | Self::Wallet => "pay",
            Self::Razorpay => "rzp",
            Self::PhonePe => "phonepe",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Upi => write!(f, "upi"),
            Self::Wallet => write!(f, "wallet"),
            Self::Razorpay => write!(f, "razorpay"),
            Self::PhonePe => write!(f, "phonepe"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "wallet" => Ok(Self::Wallet),
            "razorpay" => Ok(Self::Razorpay),
            "phonepe" => Ok(Self::PhonePe),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Outcome of a single payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    /// Whether the attempt has reached a final outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Stock availability label shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    /// Stock counts below this are flagged as running low.
    pub const LOW_STOCK_THRESHOLD: u32 = 10;

    /// Classify a stock count.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        if count == 0 {
            Self::OutOfStock
        } else if count < Self::LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Human-readable badge text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}
