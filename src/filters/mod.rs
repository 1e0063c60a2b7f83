//! Product filtering system with composable filters.
//!
//! [`filter_products`] is the engine: it builds a [`FilterChain`] from a
//! [`FilterConfig`], keeps the products every active stage accepts, then
//! applies the configured ordering. It is a pure function of its inputs.

pub mod availability;
pub mod deals;
pub mod price;
pub mod rating;
pub mod search;
pub mod selection;
pub mod sort;
pub mod state;

use crate::catalog::{Brand, Category, Product};
use rust_decimal::Decimal;
use tracing::{debug, trace};

pub use availability::AvailabilityFilter;
pub use deals::DealsFilter;
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use search::SearchFilter;
pub use selection::{BrandFilter, CategoryFilter, FeatureFilter};
pub use state::{Availability, FilterConfig, FilterError, PriceRange, SortBy};

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Builds the chain for a filter configuration, skipping inactive stages.
    pub fn from_config(config: &FilterConfig) -> Self {
        let range = config.price_range();

        FilterChainBuilder::new()
            .search(config.search_query())
            .price_range(range.min, range.max)
            .categories(config.selected_categories().iter().copied())
            .brands(config.selected_brands().iter().copied())
            .availability(config.availability())
            .min_rating(config.min_rating())
            .deals_only(config.show_deals_only())
            .features(config.selected_features().iter().cloned())
            .build()
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filters a collection of products, keeping their order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }

    /// Returns the descriptions of the filters that reject `product`.
    pub fn rejections(&self, product: &Product) -> Vec<String> {
        self.filters.iter().filter(|f| !f.matches(product)).map(|f| f.description()).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from individual criteria.
///
/// Every method except `price_range` is a no-op for its "no restriction"
/// value, so the built chain only holds stages that can exclude something.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a text search filter.
    pub fn search(mut self, query: &str) -> Self {
        if !query.is_empty() {
            self.chain.add(SearchFilter::new(query));
        }
        self
    }

    /// Adds an inclusive price range filter.
    pub fn price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.chain.add(PriceFilter::new(min, max));
        self
    }

    /// Adds a category allow-list.
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        let filter_set: Vec<Category> = categories.into_iter().collect();
        if !filter_set.is_empty() {
            self.chain.add(CategoryFilter::new(filter_set));
        }
        self
    }

    /// Adds a brand allow-list.
    pub fn brands(mut self, brands: impl IntoIterator<Item = Brand>) -> Self {
        let filter_set: Vec<Brand> = brands.into_iter().collect();
        if !filter_set.is_empty() {
            self.chain.add(BrandFilter::new(filter_set));
        }
        self
    }

    /// Adds an availability restriction.
    pub fn availability(mut self, availability: Availability) -> Self {
        if availability != Availability::All {
            self.chain.add(AvailabilityFilter::new(availability));
        }
        self
    }

    /// Adds a minimum rating filter.
    pub fn min_rating(mut self, min: u8) -> Self {
        if min > 0 {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Adds a deals-only filter.
    pub fn deals_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(DealsFilter::new());
        }
        self
    }

    /// Adds a feature filter (any selected feature matches).
    pub fn features(mut self, features: impl IntoIterator<Item = String>) -> Self {
        let filter_set: Vec<String> = features.into_iter().collect();
        if !filter_set.is_empty() {
            self.chain.add(FeatureFilter::new(filter_set));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the ordered list of products to display.
pub fn filter_products(products: &[Product], config: &FilterConfig) -> Vec<Product> {
    let chain = FilterChain::from_config(config);
    debug!("Active filters: {}", chain.descriptions().join(", "));

    let mut kept: Vec<Product> = products
        .iter()
        .filter(|product| {
            let keep = chain.matches(product);
            if !keep {
                trace!("Excluded {}: {}", product.id, chain.rejections(product).join("; "));
            }
            keep
        })
        .cloned()
        .collect();

    config.sort_by().sort(&mut kept);

    debug!("{} of {} products match, sorted by {}", kept.len(), products.len(), config.sort_by());
    kept
}
