//! Two-decimal price formatting
//!
//! Prices arrive as JSON numbers and are held as [`Decimal`] so the
//! dashboard never goes through floating-point display coercion.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Number of fractional digits every displayed price carries
pub const PRICE_DECIMALS: u32 = 2;

/// Sentinel shown when a product has no recorded prices
pub const NOT_AVAILABLE: &str = "N/A";

/// Round to two decimals (midpoint away from zero) and pad to exactly two digits
pub fn to_fixed_2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_DECIMALS);
    rounded
}

/// Format a decimal as a fixed two-decimal string
/// Example: 10 → "10.00", 12.345 → "12.35"
pub fn format_fixed_2(value: Decimal) -> String {
    to_fixed_2(value).to_string()
}

/// A display-ready price, always scaled to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self(to_fixed_2(value))
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Most recent recorded price, or "N/A" when the history is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevPrice {
    Recorded(Price),
    NotAvailable,
}

impl PrevPrice {
    pub fn price(self) -> Option<Price> {
        match self {
            Self::Recorded(price) => Some(price),
            Self::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for PrevPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recorded(price) => std::fmt::Display::fmt(price, f),
            Self::NotAvailable => f.pad(NOT_AVAILABLE),
        }
    }
}

impl Serialize for PrevPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ========== format_fixed_2 tests ==========

    #[test]
    fn test_format_pads_integers() {
        assert_eq!(format_fixed_2(dec!(10)), "10.00");
    }

    #[test]
    fn test_format_pads_single_digit() {
        assert_eq!(format_fixed_2(dec!(12.5)), "12.50");
    }

    #[test]
    fn test_format_rounds_midpoint_away_from_zero() {
        assert_eq!(format_fixed_2(dec!(12.345)), "12.35");
        assert_eq!(format_fixed_2(dec!(12.344)), "12.34");
        assert_eq!(format_fixed_2(dec!(-0.005)), "-0.01");
    }

    #[test]
    fn test_format_rounds_up_into_next_unit() {
        assert_eq!(format_fixed_2(dec!(19.999)), "20.00");
    }

    // ========== Price tests ==========

    #[test]
    fn test_price_display_and_json() {
        let price = Price::new(dec!(7));
        assert_eq!(price.to_string(), "7.00");
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"7.00\"");
    }

    #[test]
    fn test_price_display_honors_width() {
        assert_eq!(format!("{:>8}", Price::new(dec!(1.5))), "    1.50");
        assert_eq!(format!("{:>5}", PrevPrice::NotAvailable), "  N/A");
    }

    #[test]
    fn test_price_ordering_is_numeric() {
        // As strings "9.00" > "10.00"; as prices it must be the other way round
        assert!(Price::new(dec!(9)) < Price::new(dec!(10)));
    }

    // ========== PrevPrice tests ==========

    #[test]
    fn test_prev_price_not_available() {
        let prev = PrevPrice::NotAvailable;
        assert_eq!(prev.to_string(), "N/A");
        assert_eq!(serde_json::to_string(&prev).unwrap(), "\"N/A\"");
        assert!(prev.price().is_none());
    }

    #[test]
    fn test_prev_price_recorded() {
        let prev = PrevPrice::Recorded(Price::new(dec!(3.1)));
        assert_eq!(prev.to_string(), "3.10");
        assert_eq!(prev.price(), Some(Price::new(dec!(3.10))));
    }
}
