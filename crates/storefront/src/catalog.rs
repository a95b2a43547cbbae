//! In-memory product catalog.
//!
//! The catalog is read-only: stock counts are shown to shoppers but adding to
//! the cart never reserves or decrements them.

use serde::Serialize;

use kalartz_core::{CategoryId, Money, ProductId};

use crate::models::Product;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Products and categories available to shoppers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

struct DemoProduct {
    id: i32,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: i32,
    vendor: &'static str,
    stock: u32,
    rating_tenths: u8,
}

const DEMO_CATEGORIES: &[(i32, &str, &str)] = &[
    (1, "Electronics", "electronics"),
    (2, "Fashion", "fashion"),
    (3, "Home & Living", "home-living"),
    (4, "Beauty", "beauty"),
];

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        id: 1,
        name: "Wireless Headphones",
        description: "Over-ear noise cancelling headphones with 30 hour battery",
        cents: 19_999,
        category: 1,
        vendor: "John Vendor",
        stock: 25,
        rating_tenths: 45,
    },
    DemoProduct {
        id: 2,
        name: "Smart Watch",
        description: "Fitness tracking, heart rate monitor, and notifications",
        cents: 29_999,
        category: 1,
        vendor: "John Vendor",
        stock: 8,
        rating_tenths: 43,
    },
    DemoProduct {
        id: 3,
        name: "Cotton Kurta",
        description: "Hand-block printed cotton kurta",
        cents: 4_999,
        category: 2,
        vendor: "Jaipur Weaves",
        stock: 40,
        rating_tenths: 47,
    },
    DemoProduct {
        id: 4,
        name: "Leather Tote",
        description: "Full-grain leather tote bag",
        cents: 8_950,
        category: 2,
        vendor: "Jaipur Weaves",
        stock: 0,
        rating_tenths: 44,
    },
    DemoProduct {
        id: 5,
        name: "Brass Table Lamp",
        description: "Hand-finished brass lamp with linen shade",
        cents: 6_500,
        category: 3,
        vendor: "John Vendor",
        stock: 12,
        rating_tenths: 46,
    },
    DemoProduct {
        id: 6,
        name: "Ceramic Dinner Set",
        description: "Sixteen-piece stoneware dinner set",
        cents: 12_000,
        category: 3,
        vendor: "Studio Terra",
        stock: 5,
        rating_tenths: 48,
    },
    DemoProduct {
        id: 7,
        name: "Herbal Face Oil",
        description: "Cold-pressed facial oil with saffron",
        cents: 2_450,
        category: 4,
        vendor: "Studio Terra",
        stock: 60,
        rating_tenths: 42,
    },
    DemoProduct {
        id: 8,
        name: "Bluetooth Speaker",
        description: "Portable waterproof speaker",
        cents: 5_999,
        category: 1,
        vendor: "John Vendor",
        stock: 3,
        rating_tenths: 41,
    },
];

impl Catalog {
    /// Build a catalog from explicit data.
    #[must_use]
    pub const fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// The catalog the demo storefront ships with.
    #[must_use]
    pub fn demo() -> Self {
        let categories = DEMO_CATEGORIES
            .iter()
            .map(|&(id, name, slug)| Category {
                id: CategoryId::new(id),
                name: name.to_string(),
                slug: slug.to_string(),
            })
            .collect();
        let products = DEMO_PRODUCTS
            .iter()
            .map(|demo| Product {
                id: ProductId::new(demo.id),
                name: demo.name.to_string(),
                description: demo.description.to_string(),
                price: Money::from_minor_units(demo.cents),
                image: format!("/images/products/{}.jpg", demo.id),
                category_id: CategoryId::new(demo.category),
                vendor_name: demo.vendor.to_string(),
                stock: demo.stock,
                rating_tenths: demo.rating_tenths,
            })
            .collect();
        Self::new(categories, products)
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products, in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Products in one category, in listing order.
    pub fn in_category(&self, id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.category_id == id)
    }

    /// Products sold by a vendor, matched by display name.
    pub fn by_vendor<'a>(&'a self, vendor_name: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| product.vendor_name == vendor_name)
    }
}
