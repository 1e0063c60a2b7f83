//! Shopping cart and price quotes.

use crate::catalog::{Catalog, Product};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart has no item for product '{0}'")]
    ItemNotFound(String),

    #[error("product '{0}' is not in the catalog")]
    ProductNotFound(String),
}

/// One product and its quantity in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of cart lines, one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from `(product id, quantity)` pairs looked up in `catalog`.
    pub fn quote(catalog: &Catalog, items: &[(String, u32)]) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for (id, quantity) in items {
            let product = catalog.get(id).ok_or_else(|| CartError::ProductNotFound(id.clone()))?;
            cart.add(product, *quantity);
        }
        Ok(cart)
    }

    /// Adds a product, merging with an existing line. Zero counts as one.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!("Cart: {} now x{}", product.id, line.quantity);
            return;
        }

        debug!("Cart: added {} x{}", product.id, quantity);
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        });
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return Err(CartError::ItemNotFound(product_id.to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_product;

    #[test]
    fn test_add_merges_quantities() {
        let mouse = make_product("mouse", "129.99", "4.8");
        let mut cart = Cart::new();
        cart.add(&mouse, 1);
        cart.add(&mouse, 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(38997, 2));
    }

    #[test]
    fn test_add_zero_counts_as_one() {
        let mut cart = Cart::new();
        cart.add(&make_product("a", "10.00", "4.0"), 0);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&make_product("a", "10.00", "4.0"), 1);
        cart.add(&make_product("b", "5.50", "4.0"), 1);

        cart.update_quantity("a", 4).unwrap();
        assert_eq!(cart.lines()[0].line_total(), Decimal::from(40));
        assert_eq!(cart.total_price(), Decimal::new(4550, 2));

        cart.update_quantity("b", 0).unwrap();
        assert_eq!(cart.lines().len(), 1);

        assert_eq!(
            cart.update_quantity("missing", 2),
            Err(CartError::ItemNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&make_product("a", "10.00", "4.0"), 1);
        cart.add(&make_product("b", "20.00", "4.0"), 1);

        cart.remove("a").unwrap();
        assert!(cart.remove("a").is_err());
        assert_eq!(cart.total_items(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_quote() {
        let catalog = Catalog::new(vec![
            make_product("a", "59.99", "4.0"),
            make_product("b", "129.99", "4.0"),
        ]);

        let items = vec![("a".to_string(), 2), ("b".to_string(), 1), ("a".to_string(), 1)];
        let cart = Cart::quote(&catalog, &items).unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Decimal::new(30996, 2));

        let err = Cart::quote(&catalog, &[("zzz".to_string(), 1)]).unwrap_err();
        assert_eq!(err, CartError::ProductNotFound("zzz".to_string()));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut cart = Cart::new();
        cart.add(&make_product("a", "10.00", "4.0"), 2);
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"productId\":\"a\""));
        assert!(json.contains("\"unitPrice\":\"10.00\""));
    }
}
