//! Minimum rating filter.

use super::Filter;
use crate::catalog::Product;
use rust_decimal::Decimal;

/// Filters products by minimum star rating.
pub struct RatingFilter {
    min_stars: Decimal,
}

impl RatingFilter {
    /// Creates a new rating filter with minimum whole stars (capped at 5).
    pub fn new(min_stars: u8) -> Self {
        Self { min_stars: Decimal::from(min_stars.min(5)) }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, product: &Product) -> bool {
        product.rating >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {} stars", self.min_stars)
    }
}
