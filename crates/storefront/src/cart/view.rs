//! Display projection of a cart.
//!
//! Prices are formatted here, in the store currency, and nowhere earlier.

use serde::Serialize;

use kalartz_core::CurrencyCode;

use super::{Cart, CartLine};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Project a cart into display data.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartLineView::new(line, currency))
                .collect(),
            subtotal: cart.total().display(currency),
            item_count: cart.item_count(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartLineView {
    fn new(line: &CartLine, currency: CurrencyCode) -> Self {
        let product = line.product();
        Self {
            product_id: product.id.as_i32(),
            name: product.name.clone(),
            image: product.image.clone(),
            quantity: line.quantity(),
            price: product.unit_price.display(currency),
            line_price: line.line_total().display(currency),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kalartz_core::{CategoryId, ProductId};

    use super::*;
    use crate::models::Product;

    #[test]
    fn test_view_formats_in_store_currency() {
        let mut cart = Cart::new();
        let shawl = Product {
            id: ProductId::new(7),
            name: "Pashmina Shawl".to_string(),
            description: String::new(),
            price: "5.50".parse().unwrap(),
            image: "/img/shawl.jpg".to_string(),
            category_id: CategoryId::new(2),
            vendor_name: "Valley Looms".to_string(),
            stock: 4,
            rating_tenths: 47,
        };
        cart.add_item(&shawl);
        cart.add_item(&shawl);

        let view = CartView::new(&cart, CurrencyCode::INR);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "₹11.00");
        let line = view.items.first().unwrap();
        assert_eq!(line.price, "₹5.50");
        assert_eq!(line.line_price, "₹11.00");
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::new(&Cart::new(), CurrencyCode::USD);
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
    }
}
