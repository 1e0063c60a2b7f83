//! Cart quote command implementation.

use super::load_catalog;
use crate::cart::Cart;
use crate::catalog::{provider_for, CatalogProvider};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Prices a list of `id[:qty]` items against the catalog.
pub struct QuoteCommand {
    config: Config,
}

impl QuoteCommand {
    /// Creates a new quote command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Quotes items against the configured catalog.
    pub async fn execute(&self, items: &[String]) -> Result<String> {
        let provider = provider_for(&self.config)?;
        self.execute_with_provider(provider.as_ref(), items).await
    }

    /// Quotes items with a provided catalog source (for testing).
    pub async fn execute_with_provider(
        &self,
        provider: &dyn CatalogProvider,
        items: &[String],
    ) -> Result<String> {
        let parsed = items.iter().map(|item| parse_item(item)).collect::<Result<Vec<_>>>()?;

        let catalog = load_catalog(provider).await?;
        let cart = Cart::quote(&catalog, &parsed)?;
        info!("Quoted {} items, total {}", cart.total_items(), cart.total_price());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_cart(&cart))
    }
}

/// Parses `id` or `id:qty`. A missing quantity means one.
pub fn parse_item(item: &str) -> Result<(String, u32)> {
    let item = item.trim();
    let (id, quantity) = match item.rsplit_once(':') {
        Some((id, qty)) => {
            let qty = qty
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid quantity in '{}'", item))?;
            (id.trim(), qty)
        }
        None => (item, 1),
    };

    if id.is_empty() {
        anyhow::bail!("Missing product id in '{}'", item);
    }

    Ok((id.to_string(), quantity))
}
