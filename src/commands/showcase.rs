//! Ranked storefront views: top deals and upcoming releases.

use super::load_catalog;
use crate::catalog::{provider_for, Catalog, CatalogProvider, Product};
use crate::config::Config;
use crate::filters::filter_products;
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Which ranking to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showcase {
    /// Deals by discount percentage, largest first
    TopDeals,
    /// Dated pre-orders by release date, soonest first
    UpcomingReleases,
}

impl Showcase {
    fn rank<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        match self {
            Showcase::TopDeals => catalog.top_deals(),
            Showcase::UpcomingReleases => catalog.upcoming_releases(),
        }
    }
}

/// Narrows the catalog with the configured `[filters]`, then ranks what is
/// left and keeps the first `top` products.
pub struct ShowcaseCommand {
    config: Config,
}

impl ShowcaseCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, showcase: Showcase, top: usize) -> Result<String> {
        let provider = provider_for(&self.config)?;
        self.execute_with_provider(provider.as_ref(), showcase, top).await
    }

    pub async fn execute_with_provider(
        &self,
        provider: &dyn CatalogProvider,
        showcase: Showcase,
        top: usize,
    ) -> Result<String> {
        let filters = &self.config.filters;
        filters.validate()?;

        let catalog = load_catalog(provider).await?;
        let narrowed = Catalog::new(filter_products(catalog.products(), filters));

        let ranked: Vec<Product> =
            showcase.rank(&narrowed).into_iter().take(top).cloned().collect();
        info!("Showing {} of {} ranked products", ranked.len(), narrowed.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{sample_products, MockCatalog};
    use crate::config::OutputFormat;
    use crate::filters::SortBy;
    use chrono::NaiveDate;

    fn ids(output: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        value.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap().to_string()).collect()
    }

    fn json_config() -> Config {
        let mut config = Config::default();
        config.format = OutputFormat::Json;
        config
    }

    #[tokio::test]
    async fn test_top_deals_ignore_sort_order() {
        let mut config = json_config();
        config.filters.set_sort_by(SortBy::PriceLow);

        // mouse is 19% off, game 14% off
        let output = ShowcaseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()), Showcase::TopDeals, 3)
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["mouse", "game"]);
    }

    #[tokio::test]
    async fn test_top_limits_results() {
        let output = ShowcaseCommand::new(json_config())
            .execute_with_provider(&MockCatalog::new(sample_products()), Showcase::TopDeals, 1)
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["mouse"]);
    }

    #[tokio::test]
    async fn test_upcoming_releases_skip_undated() {
        let mut products = sample_products();
        let mut dated = products[2].clone();
        dated.id = "dated".to_string();
        dated.release_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        products.push(dated);

        let output = ShowcaseCommand::new(json_config())
            .execute_with_provider(&MockCatalog::new(products), Showcase::UpcomingReleases, 3)
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["dated"]);
    }

    #[tokio::test]
    async fn test_filters_narrow_before_ranking() {
        let mut config = json_config();
        config.filters.toggle_category(crate::catalog::Category::Ps5Games);

        let output = ShowcaseCommand::new(config)
            .execute_with_provider(&MockCatalog::new(sample_products()), Showcase::TopDeals, 3)
            .await
            .unwrap();
        assert_eq!(ids(&output), vec!["game"]);
    }
}
