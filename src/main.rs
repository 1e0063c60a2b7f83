//! gearshop - product catalog browser for a gaming-goods storefront

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gearshop::catalog::{Brand, Category};
use gearshop::commands::{
    BrowseCommand, Facet, FacetsCommand, ProductCommand, QuoteCommand, Showcase, ShowcaseCommand,
};
use gearshop::config::{Config, OutputFormat};
use gearshop::filters::{Availability, FilterConfig, SortBy};
use rust_decimal::Decimal;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gearshop",
    version,
    about = "Browse, filter and price a gaming-goods catalog",
    long_about = "Browse a gaming-goods catalog from the built-in seed data, a JSON file, or a storefront's /api/products endpoint."
)]
struct Cli {
    /// JSON catalog file to load instead of the built-in catalog [env: GEARSHOP_CATALOG]
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Storefront base URL serving /api/products [env: GEARSHOP_CATALOG_URL]
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by the listing subcommands. Unset flags keep the
/// config file's `[filters]` values unless `--reset` is given.
#[derive(Args)]
struct FilterArgs {
    /// Ignore the config file's [filters] and start from defaults
    #[arg(long)]
    reset: bool,

    /// Text to find in name, description or tags
    #[arg(short, long)]
    search: Option<String>,

    /// Minimum price (inclusive)
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Maximum price (inclusive)
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Categories to include (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    category: Vec<Category>,

    /// Brands to include (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    brand: Vec<Brand>,

    /// Feature tags, any of which must be present (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    feature: Vec<String>,

    /// Availability: all, in-stock, pre-order
    #[arg(long)]
    availability: Option<Availability>,

    /// Minimum star rating (0-5)
    #[arg(long)]
    min_rating: Option<u8>,

    /// Only show discounted products
    #[arg(long, conflicts_with = "no_deals")]
    deals: bool,

    /// Include products that are not discounted
    #[arg(long)]
    no_deals: bool,

    /// Sort order: featured, price-low, price-high, rating, newest
    #[arg(long)]
    sort: Option<SortBy>,

    /// Maximum number of products to print
    #[arg(short, long)]
    limit: Option<usize>,
}

impl FilterArgs {
    /// Layers the flags over `filters`.
    fn apply(self, filters: &mut FilterConfig, limit: &mut Option<usize>) -> Result<()> {
        if self.reset {
            filters.reset();
        }

        if let Some(query) = self.search {
            filters.set_search_query(query);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let current = filters.price_range();
            filters.set_price_range(
                self.min_price.unwrap_or(current.min),
                self.max_price.unwrap_or(current.max),
            )?;
        }

        if !self.category.is_empty() {
            filters.set_categories(self.category);
        }
        if !self.brand.is_empty() {
            filters.set_brands(self.brand);
        }
        if !self.feature.is_empty() {
            filters.set_features(self.feature);
        }
        if let Some(availability) = self.availability {
            filters.set_availability(availability);
        }
        if let Some(rating) = self.min_rating {
            filters.set_min_rating(rating)?;
        }
        if self.deals {
            filters.set_show_deals_only(true);
        }
        if self.no_deals {
            filters.set_show_deals_only(false);
        }
        if let Some(sort) = self.sort {
            filters.set_sort_by(sort);
        }
        if self.limit.is_some() {
            *limit = self.limit;
        }

        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    #[command(alias = "b")]
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List discounted products
    Deals {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show the N biggest discounts instead of the sorted listing
        #[arg(long)]
        top: Option<NonZeroUsize>,
    },

    /// List products open for pre-order
    #[command(name = "pre-orders")]
    PreOrders {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show the N soonest dated releases instead of the sorted listing
        #[arg(long)]
        top: Option<NonZeroUsize>,
    },

    /// Show product details by id
    #[command(alias = "p")]
    Product {
        /// Product id(s) to look up
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Price a cart of items given as id or id:qty
    #[command(alias = "q")]
    Quote {
        /// Items to quote
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// List categories with product counts
    Categories,

    /// List brands with product counts
    Brands,

    /// List feature tags with product counts
    Features,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(path) = cli.catalog {
        config.use_catalog_file(path);
    }
    if let Some(url) = cli.catalog_url {
        config.use_catalog_url(url);
    }

    let output = match cli.command {
        Commands::Browse { filters } => {
            filters.apply(&mut config.filters, &mut config.limit)?;
            BrowseCommand::new(config).execute().await?
        }

        Commands::Deals { filters, top } => {
            filters.apply(&mut config.filters, &mut config.limit)?;
            config.filters.set_show_deals_only(true);
            match top {
                Some(n) => ShowcaseCommand::new(config).execute(Showcase::TopDeals, n.get()).await?,
                None => BrowseCommand::new(config).execute().await?,
            }
        }

        Commands::PreOrders { filters, top } => {
            filters.apply(&mut config.filters, &mut config.limit)?;
            config.filters.set_availability(Availability::PreOrder);
            match top {
                Some(n) => {
                    ShowcaseCommand::new(config).execute(Showcase::UpcomingReleases, n.get()).await?
                }
                None => BrowseCommand::new(config).execute().await?,
            }
        }

        Commands::Product { ids } => ProductCommand::new(config).execute(&ids).await?,

        Commands::Quote { items } => QuoteCommand::new(config).execute(&items).await?,

        Commands::Categories => FacetsCommand::new(config).execute(Facet::Categories).await?,

        Commands::Brands => FacetsCommand::new(config).execute(Facet::Brands).await?,

        Commands::Features => FacetsCommand::new(config).execute(Facet::Features).await?,
    };

    println!("{}", output);
    Ok(())
}
