//! Product lookup command implementation.

use super::load_catalog;
use crate::catalog::{provider_for, CatalogProvider, Product};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;
use tracing::{info, warn};

/// Shows product details by id.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up products in the configured catalog.
    pub async fn execute(&self, ids: &[String]) -> Result<String> {
        let provider = provider_for(&self.config)?;
        self.execute_with_provider(provider.as_ref(), ids).await
    }

    /// Looks up products with a provided catalog source (for testing).
    ///
    /// A single id must exist. With several ids, unknown ones are skipped with
    /// a warning and the rest are listed.
    pub async fn execute_with_provider(
        &self,
        provider: &dyn CatalogProvider,
        ids: &[String],
    ) -> Result<String> {
        let catalog = load_catalog(provider).await?;
        let formatter = Formatter::new(self.config.format);

        if let [id] = ids {
            let id = id.trim();
            info!("Looking up product: {}", id);
            let product =
                catalog.get(id).ok_or_else(|| anyhow::anyhow!("Product not found: '{}'", id))?;
            return Ok(formatter.format_product(product));
        }

        let mut products: Vec<Product> = Vec::new();
        for id in ids {
            let id = id.trim();
            match catalog.get(id) {
                Some(product) => products.push(product.clone()),
                None => warn!("Skipping unknown product id: {}", id),
            }
        }

        if products.is_empty() {
            anyhow::bail!("None of the requested products were found");
        }

        Ok(formatter.format_products(&products))
    }
}
