//! Browse command implementation.

use super::load_catalog;
use crate::catalog::{provider_for, CatalogProvider};
use crate::config::Config;
use crate::filters::filter_products;
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Filters and sorts the catalog with the configured `[filters]`.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and returns formatted results.
    pub async fn execute(&self) -> Result<String> {
        let provider = provider_for(&self.config)?;
        self.execute_with_provider(provider.as_ref()).await
    }

    /// Browses a provided catalog source (for testing).
    pub async fn execute_with_provider(&self, provider: &dyn CatalogProvider) -> Result<String> {
        let filters = &self.config.filters;
        filters.validate()?;

        let catalog = load_catalog(provider).await?;

        let mut products = filter_products(catalog.products(), filters);
        info!("Found {} of {} products matching criteria", products.len(), catalog.len());

        if let Some(limit) = self.config.limit {
            products.truncate(limit);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::commands::mock::{sample_products, MockCatalog};
    use crate::config::OutputFormat;
    use crate::filters::{Availability, SortBy};

    fn json_config() -> Config {
        let mut config = Config::default();
        config.format = OutputFormat::Json;
        config
    }

    fn ids(output: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_browse_defaults_lists_everything() {
        let provider = MockCatalog::new(sample_products());
        let cmd = BrowseCommand::new(json_config());

        let output = cmd.execute_with_provider(&provider).await.unwrap();
        assert_eq!(ids(&output), vec!["mouse", "keyboard", "chair", "game"]);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_browse_deals_sorted_by_price() {
        let mut config = json_config();
        config.filters.set_show_deals_only(true);
        config.filters.set_sort_by(SortBy::PriceLow);

        let output = BrowseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()))
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["game", "mouse"]);
    }

    #[tokio::test]
    async fn test_browse_pre_orders() {
        let mut config = json_config();
        config.filters.set_availability(Availability::PreOrder);

        let output = BrowseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()))
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["chair"]);
    }

    #[tokio::test]
    async fn test_browse_limit() {
        let mut config = json_config();
        config.limit = Some(2);
        config.filters.set_sort_by(SortBy::PriceHigh);

        let output = BrowseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()))
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["chair", "keyboard"]);
    }

    #[tokio::test]
    async fn test_browse_no_matches() {
        let mut config = Config::default();
        config.filters.toggle_category(Category::Monitors);

        let output = BrowseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()))
            .await
            .unwrap();
        assert_eq!(output, "No products found.");
    }

    #[tokio::test]
    async fn test_browse_provider_error() {
        let err = BrowseCommand::new(Config::default())
            .execute_with_provider(&MockCatalog::failing())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load mock catalog"));
        assert!(format!("{:#}", err).contains("network error"));
    }
}
