//! Product domain types.

use serde::{Deserialize, Serialize};

use kalartz_core::{CategoryId, Money, ProductId, StockLevel};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Image URL or asset path.
    pub image: String,
    pub category_id: CategoryId,
    pub vendor_name: String,
    /// Units on hand. Informational; the cart does not reserve stock.
    pub stock: u32,
    /// Average review score, tenths of a star (45 = 4.5).
    pub rating_tenths: u8,
}

impl Product {
    /// Availability label derived from the stock count.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_count(self.stock)
    }

    /// Capture the fields a cart line keeps.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            unit_price: self.price,
            image: self.image.clone(),
        }
    }
}

/// Display fields of a product, frozen when it was added to the cart.
///
/// Later catalog price changes do not reach lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
}
