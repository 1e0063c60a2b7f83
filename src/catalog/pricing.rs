//! Price helpers shared by the filters and the display layer.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Returns true when an original price is present and above the current price.
///
/// This is the single definition of a "deal": the deals filter, the catalog's
/// deal listing, and the formatter all go through here.
pub fn is_on_sale(price: Decimal, original: Option<Decimal>) -> bool {
    matches!(original, Some(orig) if orig > price)
}

/// Returns the whole-number discount percentage, or 0 when not on sale.
pub fn discount_percent(price: Decimal, original: Option<Decimal>) -> u8 {
    let Some(orig) = original.filter(|orig| *orig > price) else {
        return 0;
    };

    let percent = ((orig - price) / orig * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    percent.to_u8().unwrap_or(100)
}

/// Formats an amount as dollars with two decimal places.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn test_is_on_sale() {
        assert!(is_on_sale(d(5999, 2), Some(d(6999, 2))));
        assert!(!is_on_sale(d(5999, 2), None));
        assert!(!is_on_sale(d(5999, 2), Some(d(5999, 2))));
        assert!(!is_on_sale(d(5999, 2), Some(d(4999, 2))));
    }

    #[test]
    fn test_discount_percent() {
        // (69.99 - 59.99) / 69.99 = 14.29%
        assert_eq!(discount_percent(d(5999, 2), Some(d(6999, 2))), 14);
        assert_eq!(discount_percent(d(12999, 2), Some(d(15999, 2))), 19);
        assert_eq!(discount_percent(d(999, 2), Some(d(1999, 2))), 50);
        assert_eq!(discount_percent(d(3999, 2), Some(d(6999, 2))), 43);
    }

    #[test]
    fn test_discount_percent_not_on_sale() {
        assert_eq!(discount_percent(d(5999, 2), None), 0);
        assert_eq!(discount_percent(d(5999, 2), Some(d(5999, 2))), 0);
        assert_eq!(discount_percent(d(5999, 2), Some(d(1000, 2))), 0);
    }

    #[test]
    fn test_discount_percent_rounds_half_up() {
        // 12.5% off rounds to 13
        assert_eq!(discount_percent(d(35, 0), Some(d(40, 0))), 13);
        // free item is a full discount
        assert_eq!(discount_percent(Decimal::ZERO, Some(d(40, 0))), 100);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(d(12999, 2)), "$129.99");
        assert_eq!(format_price(d(5, 0)), "$5.00");
        assert_eq!(format_price(d(2899999, 3)), "$2900.00");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
