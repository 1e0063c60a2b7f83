//! Product catalog: data models, pricing rules, sources, and lookups.

pub mod models;
pub mod pricing;
pub mod provider;
pub mod store;

pub use models::{Brand, CatalogError, Category, CategoryGroup, Product, ProductRecord, UnknownVariant};
pub use provider::{provider_for, BuiltinCatalog, CatalogProvider, HttpCatalog, JsonFileCatalog};
pub use store::Catalog;
