//! Deals-only filter.

use super::Filter;
use crate::catalog::Product;

/// Keeps only discounted products.
pub struct DealsFilter;

impl DealsFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DealsFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for DealsFilter {
    fn matches(&self, product: &Product) -> bool {
        product.is_deal()
    }

    fn description(&self) -> String {
        "Deals only".to_string()
    }
}
