//! Result ordering.

use super::state::SortBy;
use crate::catalog::Product;

impl SortBy {
    /// Sorts in place. The sort is stable, so products with equal keys keep
    /// their catalog order.
    pub fn sort(&self, products: &mut [Product]) {
        match self {
            SortBy::Featured => {}
            SortBy::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortBy::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortBy::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortBy::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}
