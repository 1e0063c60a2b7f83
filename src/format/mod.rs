//! Output formatting for products, carts, and facet counts (table, JSON,
//! markdown, CSV).

use crate::cart::Cart;
use crate::catalog::pricing::format_price;
use crate::catalog::Product;
use crate::config::OutputFormat;
use serde_json::json;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats a cart with per-line and overall totals.
    pub fn format_cart(&self, cart: &Cart) -> String {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "lines": cart.lines(),
                    "totalItems": cart.total_items(),
                    "totalPrice": cart.total_price(),
                });
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_cart(cart),
            OutputFormat::Markdown => self.markdown_cart(cart),
            OutputFormat::Csv => self.csv_cart(cart),
        }
    }

    /// Formats `(name, count)` rows, e.g. products per category.
    pub fn format_counts(&self, label: &str, rows: &[(String, usize)]) -> String {
        match self.format {
            OutputFormat::Json => {
                let value: Vec<_> =
                    rows.iter().map(|(name, count)| json!({ "name": name, "count": count })).collect();
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => {
                let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0).max(label.len());
                let mut lines = vec![format!("{:<width$}  {:>8}", label, "Products")];
                lines.push(format!("{:-<width$}  {:->8}", "", ""));
                for (name, count) in rows {
                    lines.push(format!("{:<width$}  {:>8}", name, count));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("| {} | Products |", label), "|---|---|".to_string()];
                for (name, count) in rows {
                    lines.push(format!("| {} | {} |", name, count));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec![format!("{},products", label.to_lowercase())];
                for (name, count) in rows {
                    lines.push(format!("{},{}", Self::csv_escape(name), count));
                }
                lines.join("\n")
            }
        }
    }

    fn stock_label(product: &Product) -> &'static str {
        if product.in_stock {
            "In stock"
        } else if product.is_pre_order {
            "Pre-order"
        } else {
            "Sold out"
        }
    }

    fn truncate(s: &str, max_chars: usize) -> String {
        if s.chars().count() > max_chars {
            let head: String = s.chars().take(max_chars - 3).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }

    fn price_line(product: &Product) -> String {
        match product.original_price {
            Some(orig) if product.is_deal() => format!(
                "{} (was {}, {}% off)",
                format_price(product.price),
                format_price(orig),
                product.discount_percent()
            ),
            _ => format_price(product.price),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Name:     {}", product.name));
        lines.push(format!("Brand:    {}", product.brand));
        lines.push(format!("Category: {}", product.category.display_name()));
        lines.push(format!("Price:    {}", Self::price_line(product)));
        lines.push(format!(
            "Rating:   {:.1}/5 ({} reviews)",
            product.rating, product.review_count
        ));

        let stock = match (product.in_stock, product.release_date) {
            (true, _) => format!("In stock ({} available)", product.stock_quantity),
            (false, Some(date)) if product.is_pre_order => format!("Pre-order (releases {})", date),
            _ => Self::stock_label(product).to_string(),
        };
        lines.push(format!("Stock:    {}", stock));

        if !product.features.is_empty() {
            lines.push(format!("Features: {}", product.features.join(", ")));
        }
        if !product.compatibility.is_empty() {
            lines.push(format!("Works on: {}", product.compatibility.join(", ")));
        }
        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }
        if !product.specifications.is_empty() {
            lines.push(String::new());
            for (key, value) in &product.specifications {
                lines.push(format!("  {}: {}", key, value));
            }
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 10;
        let price_width = 10;
        let rating_width = 6;
        let stock_width = 9;
        let name_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "ID", "Price", "Rating", "Stock", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<name_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            let price = if product.is_deal() {
                format!("*{}", format_price(product.price))
            } else {
                format_price(product.price)
            };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
                product.id,
                price,
                format!("{:.1}", product.rating),
                Self::stock_label(product),
                Self::truncate(&product.name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products (* on sale)", products.len()));

        lines.join("\n")
    }

    fn table_cart(&self, cart: &Cart) -> String {
        if cart.is_empty() {
            return "Cart is empty.".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!("{:<10}  {:>4}  {:>10}  {:>10}  {}", "ID", "Qty", "Unit", "Total", "Name"));
        lines.push(format!("{:-<10}  {:->4}  {:->10}  {:->10}  {:-<40}", "", "", "", "", ""));

        for line in cart.lines() {
            lines.push(format!(
                "{:<10}  {:>4}  {:>10}  {:>10}  {}",
                line.product_id,
                line.quantity,
                format_price(line.unit_price),
                format_price(line.line_total()),
                Self::truncate(&line.name, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Items: {}", cart.total_items()));
        lines.push(format!("Total: {}", format_price(cart.total_price())));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        lines.push(format!("- **Brand:** {}", product.brand));
        lines.push(format!("- **Category:** {}", product.category));

        match product.original_price {
            Some(orig) if product.is_deal() => lines.push(format!(
                "- **Price:** {} ~~{}~~ ({}% off)",
                format_price(product.price),
                format_price(orig),
                product.discount_percent()
            )),
            _ => lines.push(format!("- **Price:** {}", format_price(product.price))),
        }

        lines.push(format!(
            "- **Rating:** {:.1}/5 ({} reviews)",
            product.rating, product.review_count
        ));
        lines.push(format!("- **Availability:** {}", Self::stock_label(product)));

        if let Some(date) = product.release_date.filter(|_| product.is_pre_order) {
            lines.push(format!("- **Release date:** {}", date));
        }

        if !product.features.is_empty() {
            lines.push(format!("- **Features:** {}", product.features.join(", ")));
        }

        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Rating | Stock | Name |".to_string());
        lines.push("|----|-------|--------|-------|------|".to_string());

        for product in products {
            let price = match product.original_price {
                Some(orig) if product.is_deal() => {
                    format!("{} ~~{}~~", format_price(product.price), format_price(orig))
                }
                _ => format_price(product.price),
            };

            lines.push(format!(
                "| {} | {} | {:.1} | {} | {} |",
                product.id,
                price,
                product.rating,
                Self::stock_label(product),
                Self::truncate(&product.name, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    fn markdown_cart(&self, cart: &Cart) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Name | Qty | Unit | Total |".to_string());
        lines.push("|----|------|-----|------|-------|".to_string());

        for line in cart.lines() {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                line.product_id,
                line.name,
                line.quantity,
                format_price(line.unit_price),
                format_price(line.line_total())
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "**{} items, total {}**",
            cart.total_items(),
            format_price(cart.total_price())
        ));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header() -> String {
        "id,name,brand,category,price,original_price,discount_percent,rating,reviews,in_stock,pre_order,features"
            .to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_header());

        for product in products {
            let original = product.original_price.map(|o| o.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.id),
                Self::csv_escape(&product.name),
                Self::csv_escape(product.brand.label()),
                Self::csv_escape(product.category.label()),
                product.price,
                original,
                product.discount_percent(),
                product.rating,
                product.review_count,
                product.in_stock,
                product.is_pre_order,
                Self::csv_escape(&product.features.join(";"))
            ));
        }

        lines.join("\n")
    }

    fn csv_cart(&self, cart: &Cart) -> String {
        let mut lines = vec!["id,name,quantity,unit_price,line_total".to_string()];

        for line in cart.lines() {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&line.product_id),
                Self::csv_escape(&line.name),
                line.quantity,
                line.unit_price,
                line.line_total()
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
