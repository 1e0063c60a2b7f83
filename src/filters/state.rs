//! Filter configuration owned by the browsing session.
//!
//! A `FilterConfig` is a plain value: callers mutate it through the setters
//! and hand a reference to [`filter_products`](super::filter_products) on every
//! change. There is no shared or global instance.

use crate::catalog::{Brand, Category};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: i64 = 5000;

/// Highest selectable rating floor.
pub const MAX_RATING_FLOOR: u8 = 5;

/// Errors from filter setters and config validation.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("price range minimum {min} is above maximum {max}")]
    InvertedPriceRange { min: Decimal, max: Decimal },

    #[error("price bound {0} is negative")]
    NegativePrice(Decimal),

    #[error("minimum rating must be between 0 and 5, got {0}")]
    InvalidRating(u8),
}

/// Stock availability restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    All,
    InStock,
    PreOrder,
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "any" => Ok(Availability::All),
            "in-stock" | "instock" | "in_stock" => Ok(Availability::InStock),
            "pre-order" | "preorder" | "pre_order" => Ok(Availability::PreOrder),
            _ => Err(format!("Unknown availability: {}. Use: all, in-stock, pre-order", s)),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::All => write!(f, "all"),
            Availability::InStock => write!(f, "in-stock"),
            Availability::PreOrder => write!(f, "pre-order"),
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured" => Ok(SortBy::Featured),
            "price-low" | "price_low" | "price-asc" => Ok(SortBy::PriceLow),
            "price-high" | "price_high" | "price-desc" => Ok(SortBy::PriceHigh),
            "rating" => Ok(SortBy::Rating),
            "newest" => Ok(SortBy::Newest),
            _ => Err(format!(
                "Unknown sort: {}. Use: featured, price-low, price-high, rating, newest",
                s
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Featured => write!(f, "featured"),
            SortBy::PriceLow => write!(f, "price-low"),
            SortBy::PriceHigh => write!(f, "price-high"),
            SortBy::Rating => write!(f, "rating"),
            SortBy::Newest => write!(f, "newest"),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: Decimal::ZERO, max: Decimal::from(DEFAULT_MAX_PRICE) }
    }
}

/// User-adjustable browsing criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    search_query: String,
    price_range: PriceRange,
    selected_categories: BTreeSet<Category>,
    selected_brands: BTreeSet<Brand>,
    availability: Availability,
    min_rating: u8,
    show_deals_only: bool,
    selected_features: BTreeSet<String>,
    sort_by: SortBy,
}

impl FilterConfig {
    /// Creates a configuration with every filter off and featured ordering.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    pub fn selected_categories(&self) -> &BTreeSet<Category> {
        &self.selected_categories
    }

    pub fn selected_brands(&self) -> &BTreeSet<Brand> {
        &self.selected_brands
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn min_rating(&self) -> u8 {
        self.min_rating
    }

    pub fn show_deals_only(&self) -> bool {
        self.show_deals_only
    }

    pub fn selected_features(&self) -> &BTreeSet<String> {
        &self.selected_features
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Sets inclusive price bounds. Leaves the config untouched on error.
    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) -> Result<(), FilterError> {
        let range = PriceRange { min, max };
        check_price_range(range)?;
        self.price_range = range;
        Ok(())
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        self.selected_categories = categories.into_iter().collect();
    }

    /// Adds the brand if absent, removes it if present.
    pub fn toggle_brand(&mut self, brand: Brand) {
        if !self.selected_brands.remove(&brand) {
            self.selected_brands.insert(brand);
        }
    }

    pub fn set_brands(&mut self, brands: impl IntoIterator<Item = Brand>) {
        self.selected_brands = brands.into_iter().collect();
    }

    pub fn set_availability(&mut self, availability: Availability) {
        self.availability = availability;
    }

    /// Sets the star floor; only whole stars 0 through 5 are accepted.
    pub fn set_min_rating(&mut self, rating: u8) -> Result<(), FilterError> {
        if rating > MAX_RATING_FLOOR {
            return Err(FilterError::InvalidRating(rating));
        }
        self.min_rating = rating;
        Ok(())
    }

    pub fn set_show_deals_only(&mut self, show: bool) {
        self.show_deals_only = show;
    }

    /// Adds the feature if absent, removes it if present.
    pub fn toggle_feature(&mut self, feature: impl Into<String>) {
        let feature = feature.into();
        if !self.selected_features.remove(&feature) {
            self.selected_features.insert(feature);
        }
    }

    pub fn set_features<I, S>(&mut self, features: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_features = features.into_iter().map(Into::into).collect();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Restores every field to its default in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true when no field differs from the defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Checks invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), FilterError> {
        check_price_range(self.price_range)?;
        if self.min_rating > MAX_RATING_FLOOR {
            return Err(FilterError::InvalidRating(self.min_rating));
        }
        Ok(())
    }
}

fn check_price_range(range: PriceRange) -> Result<(), FilterError> {
    if range.min < Decimal::ZERO {
        return Err(FilterError::NegativePrice(range.min));
    }
    if range.max < Decimal::ZERO {
        return Err(FilterError::NegativePrice(range.max));
    }
    if range.min > range.max {
        return Err(FilterError::InvertedPriceRange { min: range.min, max: range.max });
    }
    Ok(())
}
