//! Catalog sources: the embedded seed catalog, JSON files, and a storefront
//! HTTP endpoint.

use super::models::{Product, ProductRecord};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

const SEED_CATALOG: &str = include_str!("seed.json");

/// Trait for "fetch all products" sources - enables mocking for tests.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns a full, consistent snapshot of the catalog.
    async fn fetch_all(&self) -> Result<Vec<Product>>;

    /// Returns a short human-readable name of the source.
    fn describe(&self) -> String;
}

/// Converts raw JSON records into products. Records with the wrong shape or
/// values that fail validation are logged and dropped.
pub fn decode_records(records: Vec<Value>) -> Vec<Product> {
    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record = match serde_json::from_value::<ProductRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping catalog record #{}: {}", index, e);
                    return None;
                }
            };

            match Product::try_from(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("Skipping catalog record #{}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    if products.len() < total {
        warn!("Dropped {} of {} catalog records", total - products.len(), total);
    }

    products
}

/// Parses a JSON array of product records.
pub fn parse_catalog_json(json: &str) -> Result<Vec<Product>> {
    let records: Vec<Value> =
        serde_json::from_str(json).context("Catalog is not a JSON array of products")?;
    Ok(decode_records(records))
}

/// The seed catalog compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogProvider for BuiltinCatalog {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        parse_catalog_json(SEED_CATALOG).context("Built-in catalog is corrupt")
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// Catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        debug!("Reading catalog from: {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file: {}", self.path.display()))?;

        parse_catalog_json(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Catalog fetched from a storefront backend's `/api/products` endpoint.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for the storefront at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Catalog request failed with status: {}", status);
        }

        let body = response.text().await.context("Failed to read response body")?;
        let products = parse_catalog_json(&body)?;

        info!("Fetched {} products from {}", products.len(), self.base_url);
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("storefront {}", self.base_url)
    }
}

/// Picks the catalog source from configuration: URL, then file, then built-in.
pub fn provider_for(config: &Config) -> Result<Box<dyn CatalogProvider>> {
    let provider: Box<dyn CatalogProvider> = if let Some(url) = &config.catalog_url {
        if let Some(path) = &config.catalog_path {
            info!("Catalog URL {} takes precedence over file {}", url, path.display());
        }
        let timeout = Duration::from_secs(config.timeout_secs);
        Box::new(HttpCatalog::new(url.clone(), timeout)?)
    } else if let Some(path) = &config.catalog_path {
        Box::new(JsonFileCatalog::new(path.clone()))
    } else {
        Box::new(BuiltinCatalog::new())
    };

    debug!("Using {}", provider.describe());
    Ok(provider)
}
