//! CLI command implementations.

pub mod browse;
pub mod facets;
pub mod product;
pub mod quote;
pub mod showcase;

pub use browse::BrowseCommand;
pub use facets::{Facet, FacetsCommand};
pub use product::ProductCommand;
pub use quote::QuoteCommand;
pub use showcase::{Showcase, ShowcaseCommand};

use crate::catalog::{Catalog, CatalogProvider};
use anyhow::{Context, Result};
use tracing::info;

/// Fetches a catalog snapshot from `provider`.
pub(crate) async fn load_catalog(provider: &dyn CatalogProvider) -> Result<Catalog> {
    let products = provider
        .fetch_all()
        .await
        .with_context(|| format!("Failed to load {}", provider.describe()))?;

    info!("Loaded {} products from {}", products.len(), provider.describe());
    Ok(Catalog::new(products))
}
