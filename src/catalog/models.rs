//! Data models for catalog products, categories, and brands.

use super::pricing;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Store categories. Serialized with their storefront labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Gaming Mice")]
    GamingMice,
    Keyboards,
    Headsets,
    Monitors,
    #[serde(rename = "Pre-built PCs")]
    PrebuiltPcs,
    Components,
    Consoles,
    Chairs,
    Controllers,
    Software,
    #[serde(rename = "PS5 Games")]
    Ps5Games,
    #[serde(rename = "PS4 Games")]
    Ps4Games,
}

/// Coarse grouping of categories used for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryGroup {
    Peripherals,
    Hardware,
    Accessories,
    Games,
}

impl Category {
    /// Returns the storefront label ("Gaming Mice", "PS5 Games", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Category::GamingMice => "Gaming Mice",
            Category::Keyboards => "Keyboards",
            Category::Headsets => "Headsets",
            Category::Monitors => "Monitors",
            Category::PrebuiltPcs => "Pre-built PCs",
            Category::Components => "Components",
            Category::Consoles => "Consoles",
            Category::Chairs => "Chairs",
            Category::Controllers => "Controllers",
            Category::Software => "Software",
            Category::Ps5Games => "PS5 Games",
            Category::Ps4Games => "PS4 Games",
        }
    }

    /// Returns the longer heading used on category pages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::GamingMice => "Gaming Mice",
            Category::Keyboards => "Gaming Keyboards",
            Category::Headsets => "Gaming Headsets",
            Category::Monitors => "Gaming Monitors",
            Category::PrebuiltPcs => "Gaming PCs",
            Category::Components => "PC Components",
            Category::Consoles => "Gaming Consoles",
            Category::Chairs => "Gaming Chairs",
            Category::Controllers => "Game Controllers",
            Category::Software => "Gaming Software",
            Category::Ps5Games => "PlayStation 5 Games",
            Category::Ps4Games => "PlayStation 4 Games",
        }
    }

    /// Returns the navigation group this category belongs to.
    pub fn group(&self) -> CategoryGroup {
        match self {
            Category::GamingMice
            | Category::Keyboards
            | Category::Headsets
            | Category::Controllers => CategoryGroup::Peripherals,
            Category::Monitors
            | Category::PrebuiltPcs
            | Category::Components
            | Category::Consoles => CategoryGroup::Hardware,
            Category::Chairs | Category::Software => CategoryGroup::Accessories,
            Category::Ps5Games | Category::Ps4Games => CategoryGroup::Games,
        }
    }

    /// Returns all categories in storefront order.
    pub fn all() -> &'static [Category] {
        &[
            Category::GamingMice,
            Category::Keyboards,
            Category::Headsets,
            Category::Monitors,
            Category::PrebuiltPcs,
            Category::Components,
            Category::Consoles,
            Category::Chairs,
            Category::Controllers,
            Category::Software,
            Category::Ps5Games,
            Category::Ps4Games,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if let Some(category) = Category::all().iter().find(|c| c.label().to_lowercase() == key) {
            return Ok(*category);
        }

        match key.as_str() {
            "mice" | "mouse" | "gaming-mice" => Ok(Category::GamingMice),
            "keyboard" => Ok(Category::Keyboards),
            "headset" => Ok(Category::Headsets),
            "monitor" => Ok(Category::Monitors),
            "pc" | "pcs" | "prebuilt" | "pre-built" => Ok(Category::PrebuiltPcs),
            "component" => Ok(Category::Components),
            "console" => Ok(Category::Consoles),
            "chair" => Ok(Category::Chairs),
            "controller" => Ok(Category::Controllers),
            "ps5" | "ps5-games" => Ok(Category::Ps5Games),
            "ps4" | "ps4-games" => Ok(Category::Ps4Games),
            _ => Err(UnknownVariant::new("category", s)),
        }
    }
}

/// Brands carried by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brand {
    Razer,
    Corsair,
    SteelSeries,
    #[serde(rename = "ASUS")]
    Asus,
    NexTech,
    SecretLab,
    Sony,
    Microsoft,
    #[serde(rename = "NVIDIA")]
    Nvidia,
    #[serde(rename = "AMD")]
    Amd,
    Adobe,
    Activision,
}

impl Brand {
    /// Returns the brand label as it appears in the catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Brand::Razer => "Razer",
            Brand::Corsair => "Corsair",
            Brand::SteelSeries => "SteelSeries",
            Brand::Asus => "ASUS",
            Brand::NexTech => "NexTech",
            Brand::SecretLab => "SecretLab",
            Brand::Sony => "Sony",
            Brand::Microsoft => "Microsoft",
            Brand::Nvidia => "NVIDIA",
            Brand::Amd => "AMD",
            Brand::Adobe => "Adobe",
            Brand::Activision => "Activision",
        }
    }

    /// Returns all brands in storefront order.
    pub fn all() -> &'static [Brand] {
        &[
            Brand::Razer,
            Brand::Corsair,
            Brand::SteelSeries,
            Brand::Asus,
            Brand::NexTech,
            Brand::SecretLab,
            Brand::Sony,
            Brand::Microsoft,
            Brand::Nvidia,
            Brand::Amd,
            Brand::Adobe,
            Brand::Activision,
        ]
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Brand {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Brand::all()
            .iter()
            .find(|b| b.label().to_lowercase() == key)
            .copied()
            .ok_or_else(|| UnknownVariant::new("brand", s))
    }
}

/// Error returned when a category or brand label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = match self.kind {
            "category" => Category::all().iter().map(|c| c.label()).collect(),
            _ => Brand::all().iter().map(|b| b.label()).collect(),
        };
        write!(f, "Unknown {} '{}'. Valid values: {}", self.kind, self.value, valid.join(", "))
    }
}

impl std::error::Error for UnknownVariant {}

/// Errors raised while converting a raw catalog record into a [`Product`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {id}: {field} '{value}' is not a number")]
    InvalidNumber { id: String, field: &'static str, value: String },

    #[error("product {id}: price {price} is negative")]
    NegativePrice { id: String, price: Decimal },

    #[error("product {id}: rating {rating} is outside 0-5")]
    RatingOutOfRange { id: String, rating: Decimal },

    #[error("product {id}: {source}")]
    UnknownLabel {
        id: String,
        #[source]
        source: UnknownVariant,
    },
}

/// A catalog product. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Current selling price
    pub price: Decimal,
    /// Pre-discount price, present only for discounted items
    pub original_price: Option<Decimal>,
    pub category: Category,
    pub brand: Brand,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub is_pre_order: bool,
    /// Only meaningful for pre-order items
    pub release_date: Option<NaiveDate>,
    /// Average review score, 0.0 - 5.0
    pub rating: Decimal,
    pub review_count: u32,
    pub features: Vec<String>,
    /// Free-text search keywords
    pub tags: Vec<String>,
    pub compatibility: Vec<String>,
    pub image_urls: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns true if the product is a deal (original price above current).
    pub fn is_deal(&self) -> bool {
        pricing::is_on_sale(self.price, self.original_price)
    }

    /// Returns the discount percentage, or 0 when not on sale.
    pub fn discount_percent(&self) -> u8 {
        pricing::discount_percent(self.price, self.original_price)
    }

    /// Returns true if the product can be bought now or reserved.
    pub fn is_available(&self) -> bool {
        self.in_stock || self.is_pre_order
    }

    /// Returns true if any feature tag equals `feature`.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Returns a URL slug derived from the product name.
    pub fn slug(&self) -> String {
        let cleaned: String = self
            .name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
            .collect();

        cleaned
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Raw product as delivered by a catalog source: numbers are strings and
/// category/brand are free text until validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub is_pre_order: bool,
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default = "default_rating")]
    pub rating: String,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub compatibility: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

fn default_rating() -> String {
    "0".to_string()
}

/// Accepts a bare `YYYY-MM-DD` date or an RFC 3339 timestamp such as
/// `2024-03-15T00:00:00.000Z`, which is what JSON-encoded JS dates look like.
fn deserialize_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(value) = raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::from_str(value) {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| Some(timestamp.with_timezone(&Utc).date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid release date: {}", value)))
}

fn parse_decimal(id: &str, field: &'static str, value: &str) -> Result<Decimal, CatalogError> {
    Decimal::from_str(value.trim()).map_err(|_| CatalogError::InvalidNumber {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = record.id;

        let price = parse_decimal(&id, "price", &record.price)?;
        if price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice { id, price });
        }

        let original_price = match record.original_price.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_decimal(&id, "originalPrice", raw)?)
            }
            _ => None,
        };

        let rating = parse_decimal(&id, "rating", &record.rating)?;
        if rating < Decimal::ZERO || rating > Decimal::from(5) {
            return Err(CatalogError::RatingOutOfRange { id, rating });
        }

        let category = match record.category.parse::<Category>() {
            Ok(category) => category,
            Err(source) => return Err(CatalogError::UnknownLabel { id, source }),
        };
        let brand = match record.brand.parse::<Brand>() {
            Ok(brand) => brand,
            Err(source) => return Err(CatalogError::UnknownLabel { id, source }),
        };

        Ok(Product {
            id,
            name: record.name,
            description: record.description,
            price,
            original_price,
            category,
            brand,
            in_stock: record.in_stock,
            stock_quantity: record.stock_quantity,
            is_pre_order: record.is_pre_order,
            release_date: record.release_date,
            rating,
            review_count: record.review_count,
            features: record.features,
            tags: record.tags,
            compatibility: record.compatibility,
            image_urls: record.image_urls,
            specifications: record.specifications,
            created_at: record.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_record() -> ProductRecord {
        ProductRecord {
            id: "prod-test".to_string(),
            name: "Razer DeathAdder V3 Pro".to_string(),
            description: "Wireless gaming mouse".to_string(),
            price: "129.99".to_string(),
            original_price: Some("159.99".to_string()),
            category: "Gaming Mice".to_string(),
            brand: "Razer".to_string(),
            in_stock: true,
            stock_quantity: 50,
            is_pre_order: false,
            release_date: None,
            rating: "4.8".to_string(),
            review_count: 1234,
            features: vec!["RGB".to_string(), "Wireless".to_string()],
            tags: vec!["gaming".to_string()],
            compatibility: vec!["PC".to_string()],
            image_urls: Vec::new(),
            specifications: BTreeMap::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_record_conversion() {
        let product = Product::try_from(make_record()).unwrap();
        assert_eq!(product.price, Decimal::new(12999, 2));
        assert_eq!(product.original_price, Some(Decimal::new(15999, 2)));
        assert_eq!(product.rating, Decimal::new(48, 1));
        assert_eq!(product.category, Category::GamingMice);
        assert_eq!(product.brand, Brand::Razer);
        assert!(product.is_deal());
    }

    #[test]
    fn test_record_invalid_price() {
        let mut record = make_record();
        record.price = "twelve".to_string();
        let err = Product::try_from(record).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidNumber { field: "price", .. }));
        assert!(err.to_string().contains("'twelve' is not a number"));
    }

    #[test]
    fn test_record_invalid_original_price() {
        let mut record = make_record();
        record.original_price = Some("n/a".to_string());
        let err = Product::try_from(record).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidNumber { field: "originalPrice", .. }));
    }

    #[test]
    fn test_record_empty_original_price_is_none() {
        let mut record = make_record();
        record.original_price = Some("  ".to_string());
        let product = Product::try_from(record).unwrap();
        assert!(product.original_price.is_none());
        assert!(!product.is_deal());
    }

    #[test]
    fn test_record_negative_price() {
        let mut record = make_record();
        record.price = "-1.00".to_string();
        assert!(matches!(
            Product::try_from(record).unwrap_err(),
            CatalogError::NegativePrice { .. }
        ));
    }

    #[test]
    fn test_record_rating_out_of_range() {
        let mut record = make_record();
        record.rating = "5.1".to_string();
        assert!(matches!(
            Product::try_from(record).unwrap_err(),
            CatalogError::RatingOutOfRange { .. }
        ));
    }

    #[test]
    fn test_record_unknown_brand() {
        let mut record = make_record();
        record.brand = "Logitech".to_string();
        let err = Product::try_from(record).unwrap_err();
        assert!(err.to_string().contains("Unknown brand 'Logitech'"));
    }

    #[test]
    fn test_original_below_price_is_kept_but_not_a_deal() {
        let mut record = make_record();
        record.original_price = Some("99.99".to_string());
        let product = Product::try_from(record).unwrap();
        assert_eq!(product.original_price, Some(Decimal::new(9999, 2)));
        assert!(!product.is_deal());
        assert_eq!(product.discount_percent(), 0);
    }

    #[test]
    fn test_record_from_json() {
        let json = r#"{
            "id": "prod-0006",
            "name": "SecretLab Titan Evo 2024",
            "price": "549.99",
            "originalPrice": null,
            "category": "Chairs",
            "brand": "SecretLab",
            "inStock": false,
            "stockQuantity": 0,
            "isPreOrder": true,
            "releaseDate": "2024-03-15",
            "rating": "4.8",
            "reviewCount": 4892,
            "createdAt": "2024-01-17T09:00:00Z"
        }"#;

        let record: ProductRecord = serde_json::from_str(json).unwrap();
        let product = Product::try_from(record).unwrap();
        assert!(product.is_pre_order);
        assert!(!product.in_stock);
        assert!(product.is_available());
        assert_eq!(product.release_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(product.features.is_empty());
    }

    fn release_date_of(raw: &str) -> Result<Option<NaiveDate>, serde_json::Error> {
        let json = format!(
            r#"{{"id": "x", "name": "X", "price": "1", "category": "Chairs", "brand": "SecretLab",
                "releaseDate": {}, "createdAt": "2024-01-17T09:00:00Z"}}"#,
            raw
        );
        serde_json::from_str::<ProductRecord>(&json).map(|r| r.release_date)
    }

    #[test]
    fn test_release_date_accepts_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(release_date_of("\"2024-03-15T00:00:00.000Z\"").unwrap(), expected);
        assert_eq!(release_date_of("\"2024-03-15T23:30:00+00:00\"").unwrap(), expected);
        assert_eq!(release_date_of("\"2024-03-15\"").unwrap(), expected);
    }

    #[test]
    fn test_release_date_empty_or_null() {
        assert_eq!(release_date_of("null").unwrap(), None);
        assert_eq!(release_date_of("\"\"").unwrap(), None);
        assert!(release_date_of("\"next spring\"").is_err());
    }

    #[test]
    fn test_product_serializes_camel_case_with_string_decimals() {
        let product = Product::try_from(make_record()).unwrap();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"price\":\"129.99\""));
        assert!(json.contains("\"originalPrice\":\"159.99\""));
        assert!(json.contains("\"inStock\":true"));
        assert!(json.contains("\"category\":\"Gaming Mice\""));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Gaming Mice".parse::<Category>().unwrap(), Category::GamingMice);
        assert_eq!("gaming mice".parse::<Category>().unwrap(), Category::GamingMice);
        assert_eq!("mice".parse::<Category>().unwrap(), Category::GamingMice);
        assert_eq!("PS5".parse::<Category>().unwrap(), Category::Ps5Games);
        assert_eq!("pre-built pcs".parse::<Category>().unwrap(), Category::PrebuiltPcs);

        let err = "Toasters".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Unknown category 'Toasters'"));
        assert!(err.to_string().contains("Gaming Mice"));
    }

    #[test]
    fn test_brand_parsing() {
        assert_eq!("nvidia".parse::<Brand>().unwrap(), Brand::Nvidia);
        assert_eq!("SteelSeries".parse::<Brand>().unwrap(), Brand::SteelSeries);
        assert!("Logitech".parse::<Brand>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for category in Category::all() {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), *category);
        }
        for brand in Brand::all() {
            assert_eq!(brand.to_string().parse::<Brand>().unwrap(), *brand);
        }
    }

    #[test]
    fn test_category_display_name_and_group() {
        assert_eq!(Category::Keyboards.display_name(), "Gaming Keyboards");
        assert_eq!(Category::Ps4Games.display_name(), "PlayStation 4 Games");
        assert_eq!(Category::Controllers.group(), CategoryGroup::Peripherals);
        assert_eq!(Category::Consoles.group(), CategoryGroup::Hardware);
        assert_eq!(Category::Software.group(), CategoryGroup::Accessories);
        assert_eq!(Category::Ps5Games.group(), CategoryGroup::Games);
    }

    #[test]
    fn test_slug() {
        let mut product = Product::try_from(make_record()).unwrap();
        assert_eq!(product.slug(), "razer-deathadder-v3-pro");

        product.name = "Ratchet & Clank: Rift Apart - PS5".to_string();
        assert_eq!(product.slug(), "ratchet-clank-rift-apart-ps5");

        product.name = "ASUS ROG Ultrawide 34\"".to_string();
        assert_eq!(product.slug(), "asus-rog-ultrawide-34");
    }

    #[test]
    fn test_has_feature_is_exact() {
        let product = Product::try_from(make_record()).unwrap();
        assert!(product.has_feature("RGB"));
        assert!(!product.has_feature("rgb"));
        assert!(!product.has_feature("RGB Lighting"));
    }
}
