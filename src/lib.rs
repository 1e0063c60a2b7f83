//! gearshop - product catalog browser for a gaming-goods storefront
//!
//! Filters and sorts a catalog of peripherals, hardware and games, with
//! pluggable catalog sources and table/JSON/Markdown/CSV output.

pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{Brand, Catalog, Category, Product};
pub use config::Config;
pub use filters::{filter_products, Availability, FilterConfig, SortBy};
