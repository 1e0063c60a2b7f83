//! In-memory catalog snapshot with the storefront's lookup queries.

use super::models::{Brand, Category, Product};
use crate::filters::{Filter, SearchFilter};
use std::collections::BTreeMap;

/// A loaded catalog. Product order is the catalog ("featured") order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Returns every product in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category == category).collect()
    }

    pub fn by_brand(&self, brand: Brand) -> Vec<&Product> {
        self.products.iter().filter(|p| p.brand == brand).collect()
    }

    /// Case-insensitive search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let filter = SearchFilter::new(query);
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn pre_orders(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_pre_order).collect()
    }

    /// Products whose original price is above the current price.
    pub fn deals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_deal()).collect()
    }

    /// Deals ranked by discount percentage, largest first. Equal discounts
    /// keep catalog order.
    pub fn top_deals(&self) -> Vec<&Product> {
        let mut deals = self.deals();
        deals.sort_by(|a, b| b.discount_percent().cmp(&a.discount_percent()));
        deals
    }

    /// Dated pre-orders, soonest release first. Pre-orders without a
    /// release date are left out.
    pub fn upcoming_releases(&self) -> Vec<&Product> {
        let mut upcoming: Vec<&Product> =
            self.products.iter().filter(|p| p.is_pre_order && p.release_date.is_some()).collect();
        upcoming.sort_by_key(|p| p.release_date);
        upcoming
    }

    /// Number of products per category, in storefront order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::all().iter().map(|c| (*c, self.by_category(*c).len())).collect()
    }

    /// Number of products per brand, in storefront order.
    pub fn brand_counts(&self) -> Vec<(Brand, usize)> {
        Brand::all().iter().map(|b| (*b, self.by_brand(*b).len())).collect()
    }

    /// Number of products carrying each feature tag.
    pub fn feature_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for feature in self.products.iter().flat_map(|p| p.features.iter()) {
            *counts.entry(feature.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}
