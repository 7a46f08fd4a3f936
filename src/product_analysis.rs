//! Filtering and summing a product catalogue.

use serde::{Deserialize, Serialize};

/// The category name used by the electronics helpers.
pub const ELECTRONICS: &str = "Electronics";

/// A product in a catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub category: String,
}

impl Product {
    pub fn new(name: &str, price: f64, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            price,
            category: category.to_owned(),
        }
    }
}

fn in_category_over<'a>(
    products: &'a [Product],
    category: &'a str,
    min_price: f64,
) -> impl Iterator<Item = &'a Product> {
    products
        .iter()
        .filter(move |product| product.category == category && product.price > min_price)
}

/// Sum the prices of the products in `category` that cost strictly more than
/// `min_price`.
pub fn total_price_in_category_over(products: &[Product], category: &str, min_price: f64) -> f64 {
    in_category_over(products, category, min_price)
        .map(|product| product.price)
        .sum()
}

/// Count the products in `category` that cost strictly more than `min_price`.
pub fn count_in_category_over(products: &[Product], category: &str, min_price: f64) -> usize {
    in_category_over(products, category, min_price).count()
}

pub fn total_electronics_price_over_500(products: &[Product]) -> f64 {
    total_price_in_category_over(products, ELECTRONICS, 500.0)
}

pub fn count_electronics_over_500(products: &[Product]) -> usize {
    count_in_category_over(products, ELECTRONICS, 500.0)
}
