//! Stock availability filter.

use super::state::Availability;
use super::Filter;
use crate::catalog::Product;

/// Restricts results to in-stock or pre-order products.
///
/// The two restrictions are independent flags: a product that is neither in
/// stock nor on pre-order only survives `Availability::All`.
pub struct AvailabilityFilter {
    availability: Availability,
}

impl AvailabilityFilter {
    pub fn new(availability: Availability) -> Self {
        Self { availability }
    }
}

impl Filter for AvailabilityFilter {
    fn matches(&self, product: &Product) -> bool {
        match self.availability {
            Availability::All => true,
            Availability::InStock => product.in_stock,
            Availability::PreOrder => product.is_pre_order,
        }
    }

    fn description(&self) -> String {
        match self.availability {
            Availability::All => "Availability: any".to_string(),
            Availability::InStock => "In stock only".to_string(),
            Availability::PreOrder => "Pre-order only".to_string(),
        }
    }
}
