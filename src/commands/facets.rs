//! Category and brand listings with product counts.

use super::load_catalog;
use crate::catalog::{provider_for, Catalog, CatalogProvider};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;

/// Which enumeration to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Categories,
    Brands,
    Features,
}

impl Facet {
    fn label(&self) -> &'static str {
        match self {
            Facet::Categories => "Category",
            Facet::Brands => "Brand",
            Facet::Features => "Feature",
        }
    }

    fn rows(&self, catalog: &Catalog) -> Vec<(String, usize)> {
        match self {
            Facet::Categories => catalog
                .category_counts()
                .into_iter()
                .map(|(category, count)| (category.to_string(), count))
                .collect(),
            Facet::Brands => catalog
                .brand_counts()
                .into_iter()
                .map(|(brand, count)| (brand.to_string(), count))
                .collect(),
            Facet::Features => catalog.feature_counts().into_iter().collect(),
        }
    }
}

/// Lists a facet of the catalog.
pub struct FacetsCommand {
    config: Config,
}

impl FacetsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, facet: Facet) -> Result<String> {
        let provider = provider_for(&self.config)?;
        self.execute_with_provider(provider.as_ref(), facet).await
    }

    pub async fn execute_with_provider(
        &self,
        provider: &dyn CatalogProvider,
        facet: Facet,
    ) -> Result<String> {
        let catalog = load_catalog(provider).await?;
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_counts(facet.label(), &facet.rows(&catalog)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Brand, Category};
    use crate::commands::mock::{sample_products, MockCatalog};
    use crate::config::OutputFormat;

    fn csv() -> Config {
        let mut config = Config::default();
        config.format = OutputFormat::Csv;
        config
    }

    #[tokio::test]
    async fn test_categories_cover_every_category() {
        let output = FacetsCommand::new(csv())
            .execute_with_provider(&MockCatalog::new(sample_products()), Facet::Categories)
            .await
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), Category::all().len() + 1);
        assert!(lines.contains(&"Gaming Mice,1"));
        assert!(lines.contains(&"Monitors,0"));
    }

    #[tokio::test]
    async fn test_brands() {
        let output = FacetsCommand::new(csv())
            .execute_with_provider(&MockCatalog::new(sample_products()), Facet::Brands)
            .await
            .unwrap();

        assert_eq!(output.lines().count(), Brand::all().len() + 1);
        assert!(output.contains("SecretLab,1"));
    }

    #[tokio::test]
    async fn test_features_are_alphabetical() {
        let output = FacetsCommand::new(csv())
            .execute_with_provider(&MockCatalog::new(sample_products()), Facet::Features)
            .await
            .unwrap();

        assert_eq!(output, "feature,products\nMechanical,1\nRGB,1\nWireless,1");
    }
}
