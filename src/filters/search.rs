//! Free-text search over name, description, and tags.

use super::Filter;
use crate::catalog::Product;

/// Keeps products whose name, description, or any tag contains the query.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    /// Creates a search filter. The query is matched case-insensitively.
    pub fn new(query: impl AsRef<str>) -> Self {
        Self { query: query.as_ref().to_lowercase() }
    }
}

impl Filter for SearchFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&self.query)
            || product.description.to_lowercase().contains(&self.query)
            || product.tags.iter().any(|tag| tag.to_lowercase().contains(&self.query))
    }

    fn description(&self) -> String {
        format!("Search: \"{}\"", self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_product;

    fn make(name: &str, description: &str, tags: &[&str]) -> Product {
        let mut product = make_product("p", "10.00", "4.0");
        product.name = name.to_string();
        product.description = description.to_string();
        product.tags = tags.iter().map(|t| t.to_string()).collect();
        product
    }

    #[test]
    fn test_matches_name() {
        let filter = SearchFilter::new("deathadder");
        assert!(filter.matches(&make("Razer DeathAdder V3 Pro", "", &[])));
        assert!(!filter.matches(&make("Corsair K95", "", &[])));
    }

    #[test]
    fn test_matches_description() {
        let filter = SearchFilter::new("HYPERSPEED");
        assert!(filter.matches(&make("Mouse", "Razer HyperSpeed wireless", &[])));
    }

    #[test]
    fn test_matches_any_tag() {
        let filter = SearchFilter::new("open-world");
        assert!(filter.matches(&make("Horizon", "", &["ps5", "Open-World"])));
        assert!(!filter.matches(&make("Horizon", "", &["ps5", "rpg"])));
    }

    #[test]
    fn test_substring_match() {
        let filter = SearchFilter::new("wire");
        assert!(filter.matches(&make("Wireless Controller", "", &[])));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = SearchFilter::new("");
        assert!(filter.matches(&make("", "", &[])));
        assert!(filter.matches(&make("Anything", "at all", &["x"])));
    }

    #[test]
    fn test_whitespace_query_is_literal() {
        let filter = SearchFilter::new(" ");
        assert!(filter.matches(&make("Two words", "", &[])));
        assert!(!filter.matches(&make("Oneword", "", &["tag"])));
    }

    #[test]
    fn test_description() {
        assert_eq!(SearchFilter::new("PS5").description(), "Search: \"ps5\"");
    }
}
