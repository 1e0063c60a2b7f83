//! Price range filter.

use super::Filter;
use crate::catalog::{pricing, Product};
use rust_decimal::Decimal;

/// Filters products by current price, inclusive on both ends.
pub struct PriceFilter {
    min: Decimal,
    max: Decimal,
}

impl PriceFilter {
    /// Creates a new price filter.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, product: &Product) -> bool {
        product.price >= self.min && product.price <= self.max
    }

    fn description(&self) -> String {
        format!("Price: {} - {}", pricing::format_price(self.min), pricing::format_price(self.max))
    }
}
