//! List the demo catalog.

use tracing::info;

use kalartz_storefront::catalog::Catalog;
use kalartz_storefront::config::StorefrontConfig;

/// Log every product with its price in the store currency and its stock label.
pub fn list(config: &StorefrontConfig) {
    let catalog = Catalog::demo();

    for category in catalog.categories() {
        info!(category = %category.name, "Category");
        for product in catalog.in_category(category.id) {
            info!(
                id = %product.id,
                name = %product.name,
                price = %product.price.display(config.currency),
                vendor = %product.vendor_name,
                stock = product.stock_level().label(),
                "  Product"
            );
        }
    }
    info!(products = catalog.products().len(), "Catalog listed");
}
