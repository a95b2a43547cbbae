//! Cart aggregation and derived totals through the storefront context.

#![allow(clippy::unwrap_used)]

use kalartz_core::{Money, ProductId};
use kalartz_integration_tests::{
    ScriptedGateway, fill_scenario_cart, product, product_x, product_y, storefront,
};

#[test]
fn scenario_cart_totals() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);

    assert_eq!(storefront.total(), Money::from_minor_units(2100));
    assert_eq!(storefront.item_count(), 3);

    let cart = storefront.cart();
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.line(ProductId::new(2)).unwrap().quantity(), 2);
}

#[test]
fn lines_keep_first_added_order() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    storefront.add_item(&product_y());
    storefront.add_item(&product_x());
    storefront.add_item(&product_y());

    let ids: Vec<_> = storefront
        .cart()
        .lines()
        .iter()
        .map(|line| line.product_id().as_i32())
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn update_to_zero_removes_line() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);

    storefront.update_quantity(ProductId::new(2), 0);
    assert_eq!(storefront.total(), Money::from_minor_units(1000));
    assert!(storefront.cart().line(ProductId::new(2)).is_none());

    storefront.update_quantity(ProductId::new(1), -3);
    assert!(storefront.cart().is_empty());
}

#[test]
fn unknown_product_mutations_are_ignored() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);
    let before = storefront.cart();

    storefront.update_quantity(ProductId::new(99), 5);
    storefront.remove_item(ProductId::new(99));

    assert_eq!(storefront.cart(), before);
}

#[test]
fn price_is_frozen_when_added() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    storefront.add_item(&product_x());

    let repriced = product(1, "Product X", 9999);
    storefront.add_item(&repriced);

    assert_eq!(storefront.item_count(), 2);
    assert_eq!(storefront.total(), Money::from_minor_units(2000));
}

#[test]
fn clear_cart_empties_everything() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);
    storefront.clear_cart();

    assert!(storefront.cart().is_empty());
    assert_eq!(storefront.total(), Money::ZERO);
    assert_eq!(storefront.item_count(), 0);
}

#[test]
fn cart_view_formats_in_store_currency() {
    let storefront = storefront(ScriptedGateway::succeeding("pay_1"));
    fill_scenario_cart(&storefront);

    let view = storefront.cart_view();
    assert_eq!(view.subtotal, "$21.00");
    assert_eq!(view.items[1].price, "$5.50");
    assert_eq!(view.items[1].line_price, "$11.00");

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["item_count"], 3);
}
