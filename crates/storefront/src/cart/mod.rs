//! Cart state.
//!
//! A cart is an insertion-ordered list of lines, one per product. Each line
//! carries its total and the cart carries the sum of them, both kept with
//! checked arithmetic.
//!
//! Quantity rules:
//! - adding a product already in the cart bumps its line by one
//! - a line never holds zero; setting a quantity of zero or less removes it
//! - each line is capped at [`Cart::max_line_quantity`]
//! - updating or removing a product that is not in the cart does nothing
//! - a change whose line or cart total would overflow is refused

mod view;

pub use view::{CartLineView, CartView};

use serde::Serialize;
use tracing::{debug, warn};

use kalartz_core::{Money, ProductId};

use crate::models::{Product, ProductSnapshot};

/// Default quantity ceiling for a single line.
pub const DEFAULT_MAX_LINE_QUANTITY: u32 = 99;

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    product: ProductSnapshot,
    quantity: u32,
    line_total: Money,
}

impl CartLine {
    /// The product this line is for.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Product fields as they were when first added.
    #[must_use]
    pub const fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Units of the product, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.line_total
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Money,
    #[serde(skip)]
    max_line_quantity: u32,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// An empty cart with the default quantity ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_line_quantity(DEFAULT_MAX_LINE_QUANTITY)
    }

    /// An empty cart whose lines are capped at `max` units (at least 1).
    #[must_use]
    pub const fn with_max_line_quantity(max: u32) -> Self {
        Self {
            lines: Vec::new(),
            total: Money::ZERO,
            max_line_quantity: if max == 0 { 1 } else { max },
        }
    }

    /// Highest quantity a line can hold.
    #[must_use]
    pub const fn max_line_quantity(&self) -> u32 {
        self.max_line_quantity
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its line bumped by one, keeping the
    /// snapshot taken when it was first added. At the ceiling, or when the
    /// total would overflow, this does nothing.
    pub fn add_item(&mut self, product: &Product) {
        let max = self.max_line_quantity;
        if let Some(quantity) = self.line(product.id).map(CartLine::quantity) {
            if quantity >= max {
                debug!(product_id = %product.id, max, "line at quantity ceiling");
                return;
            }
            self.set_line_quantity(product.id, quantity + 1);
            return;
        }
        let Some(total) = self.total.checked_add(product.price) else {
            warn!(product_id = %product.id, "cart total would overflow, item not added");
            return;
        };
        self.lines.push(CartLine {
            product: product.snapshot(),
            quantity: 1,
            line_total: product.price,
        });
        self.total = total;
    }

    /// Set the quantity of a product's line.
    ///
    /// Zero or less removes the line; values above the ceiling are clamped.
    /// Does nothing if the product is not in the cart or the new total would
    /// overflow.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let max = self.max_line_quantity;
        let quantity = u32::try_from(quantity).map_or(max, |q| q.min(max));
        self.set_line_quantity(product_id, quantity);
    }

    /// Remove a product's line. Does nothing if it is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let Some(index) = self
            .lines
            .iter()
            .position(|line| line.product_id() == product_id)
        else {
            return;
        };
        let line = self.lines.remove(index);
        // The cart total always includes the removed line's total.
        self.total = self.total.checked_sub(line.line_total).unwrap_or(Money::ZERO);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Money::ZERO;
    }

    /// Lines in the order their products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of unit price times quantity over all lines. Zero when empty.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    /// Set an existing line's quantity, refusing the change on overflow.
    fn set_line_quantity(&mut self, product_id: ProductId, quantity: u32) {
        let total = self.total;
        let Some(line) = self.line_mut(product_id) else {
            return;
        };
        let updated = line
            .product
            .unit_price
            .checked_times(quantity)
            .and_then(|line_total| {
                let total = total.checked_sub(line.line_total)?.checked_add(line_total)?;
                Some((line_total, total))
            });
        let Some((line_total, total)) = updated else {
            warn!(%product_id, quantity, "cart total would overflow, quantity unchanged");
            return;
        };
        line.quantity = quantity;
        line.line_total = line_total;
        self.total = total;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kalartz_core::CategoryId;

    use super::*;

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: price.parse().unwrap(),
            image: format!("/img/{id}.jpg"),
            category_id: CategoryId::new(1),
            vendor_name: "Test Vendor".to_string(),
            stock: 50,
            rating_tenths: 40,
        }
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_adding_same_product_twice_bumps_one_line() {
        let mut cart = Cart::new();
        let p = product(1, "3.00");
        cart.add_item(&p);
        cart.add_item(&p);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(p.id).unwrap().quantity(), 2);
        assert_eq!(cart.total(), Money::from_minor_units(600));
    }

    #[test]
    fn test_totals_fold_over_lines() {
        let mut cart = Cart::new();
        let x = product(1, "10.00");
        let y = product(2, "5.50");
        cart.add_item(&x);
        cart.add_item(&y);
        cart.add_item(&y);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), "21.00".parse::<Money>().unwrap());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add_item(&product(id, "1.00"));
        }
        cart.add_item(&product(1, "1.00"));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product_id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_snapshot_is_frozen_at_first_add() {
        let mut cart = Cart::new();
        let mut p = product(1, "2.00");
        cart.add_item(&p);
        p.price = "9.00".parse().unwrap();
        cart.add_item(&p);

        assert_eq!(cart.total(), Money::from_minor_units(400));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let x = product(1, "1.00");
        let y = product(2, "1.00");
        cart.add_item(&x);
        cart.add_item(&y);

        cart.update_quantity(x.id, 0);
        assert!(cart.line(x.id).is_none());
        assert_eq!(cart.item_count(), 1);

        cart.update_quantity(y.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_and_clamps() {
        let mut cart = Cart::with_max_line_quantity(5);
        let p = product(1, "1.00");
        cart.add_item(&p);

        cart.update_quantity(p.id, 4);
        assert_eq!(cart.line(p.id).unwrap().quantity(), 4);

        cart.update_quantity(p.id, 500);
        assert_eq!(cart.line(p.id).unwrap().quantity(), 5);

        cart.update_quantity(p.id, i64::MAX);
        assert_eq!(cart.line(p.id).unwrap().quantity(), 5);
    }

    #[test]
    fn test_add_item_stops_at_ceiling() {
        let mut cart = Cart::with_max_line_quantity(2);
        let p = product(1, "1.00");
        for _ in 0..5 {
            cart.add_item(&p);
        }
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_zero_ceiling_is_raised_to_one() {
        let cart = Cart::with_max_line_quantity(0);
        assert_eq!(cart.max_line_quantity(), 1);
    }

    #[test]
    fn test_unknown_product_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "4.00"));
        let before = cart.clone();

        cart.update_quantity(ProductId::new(99), 3);
        cart.remove_item(ProductId::new(99));
        cart.update_quantity(ProductId::new(99), 0);

        assert_eq!(cart, before);
    }

    fn expensive_product(id: i32) -> Product {
        let mut p = product(id, "1.00");
        p.price = Money::from_minor_units(i64::MAX / 2 + 1);
        p
    }

    #[test]
    fn test_overflowing_quantity_is_refused() {
        let mut cart = Cart::new();
        let p = expensive_product(1);
        cart.add_item(&p);
        let before = cart.clone();

        cart.add_item(&p);
        cart.update_quantity(p.id, 3);

        assert_eq!(cart, before);
        assert_eq!(cart.line(p.id).unwrap().quantity(), 1);
        assert_eq!(cart.total(), p.price);
    }

    #[test]
    fn test_overflowing_new_line_is_refused() {
        let mut cart = Cart::new();
        cart.add_item(&expensive_product(1));
        cart.add_item(&expensive_product(2));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Money::from_minor_units(i64::MAX / 2 + 1));

        // Room frees up once the first line is gone
        cart.remove_item(ProductId::new(1));
        cart.add_item(&expensive_product(2));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_minor_units(i64::MAX / 2 + 1));
    }

    #[test]
    fn test_total_tracks_updates_and_removals() {
        let mut cart = Cart::new();
        let x = product(1, "10.00");
        let y = product(2, "5.50");
        cart.add_item(&x);
        cart.add_item(&y);

        cart.update_quantity(y.id, 4);
        assert_eq!(cart.total(), "32.00".parse::<Money>().unwrap());
        assert_eq!(cart.line(y.id).unwrap().line_total(), Money::from_minor_units(2200));

        cart.remove_item(x.id);
        assert_eq!(cart.total(), Money::from_minor_units(2200));
    }

    #[test]
    fn test_clear_twice() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "4.00"));
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }
}
