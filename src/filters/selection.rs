//! Allow-list filters for category, brand, and feature selections.
//!
//! Within one dimension the selected values are OR-ed: a product passes when
//! it matches any of them. An empty selection imposes no restriction.

use super::Filter;
use crate::catalog::{Brand, Category, Product};
use std::collections::BTreeSet;

fn join_labels<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values.into_iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

/// Keeps products in one of the selected categories.
pub struct CategoryFilter {
    allowed: BTreeSet<Category>,
}

impl CategoryFilter {
    pub fn new(allowed: impl IntoIterator<Item = Category>) -> Self {
        Self { allowed: allowed.into_iter().collect() }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&product.category)
    }

    fn description(&self) -> String {
        format!("Category: {}", join_labels(&self.allowed))
    }
}

/// Keeps products from one of the selected brands.
pub struct BrandFilter {
    allowed: BTreeSet<Brand>,
}

impl BrandFilter {
    pub fn new(allowed: impl IntoIterator<Item = Brand>) -> Self {
        Self { allowed: allowed.into_iter().collect() }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, product: &Product) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&product.brand)
    }

    fn description(&self) -> String {
        format!("Brand: {}", join_labels(&self.allowed))
    }
}

/// Keeps products that carry at least one of the selected features.
pub struct FeatureFilter {
    wanted: BTreeSet<String>,
}

impl FeatureFilter {
    /// Feature tags are compared exactly, including case.
    pub fn new<I, S>(wanted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { wanted: wanted.into_iter().map(Into::into).collect() }
    }
}

impl Filter for FeatureFilter {
    fn matches(&self, product: &Product) -> bool {
        self.wanted.is_empty() || product.features.iter().any(|f| self.wanted.contains(f))
    }

    fn description(&self) -> String {
        format!("Features: any of {}", join_labels(&self.wanted))
    }
}
