//! Price trend classification

use crate::types::{Price, PrevPrice};

/// Direction of the predicted price relative to the last recorded one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Arrow shown next to the predicted price (none when neutral)
    pub fn arrow(self) -> Option<&'static str> {
        match self {
            Self::Up => Some("▲"),
            Self::Down => Some("▼"),
            Self::Neutral => None,
        }
    }
}

/// Compare the predicted price with the previous one.
/// An "N/A" previous price has no trend.
pub fn classify_trend(prev: PrevPrice, current: Price) -> Trend {
    match prev {
        PrevPrice::NotAvailable => Trend::Neutral,
        PrevPrice::Recorded(prev) if current > prev => Trend::Up,
        PrevPrice::Recorded(prev) if current < prev => Trend::Down,
        PrevPrice::Recorded(_) => Trend::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn recorded(value: rust_decimal::Decimal) -> PrevPrice {
        PrevPrice::Recorded(Price::new(value))
    }

    #[test]
    fn test_trend_up() {
        assert_eq!(
            classify_trend(recorded(dec!(10.00)), Price::new(dec!(12.00))),
            Trend::Up
        );
    }

    #[test]
    fn test_trend_down() {
        assert_eq!(
            classify_trend(recorded(dec!(12.00)), Price::new(dec!(10.00))),
            Trend::Down
        );
    }

    #[test]
    fn test_trend_equal_is_neutral() {
        assert_eq!(
            classify_trend(recorded(dec!(10.00)), Price::new(dec!(10.00))),
            Trend::Neutral
        );
    }

    #[test]
    fn test_trend_not_available_is_neutral() {
        assert_eq!(
            classify_trend(PrevPrice::NotAvailable, Price::new(dec!(10.00))),
            Trend::Neutral
        );
    }

    #[test]
    fn test_trend_compares_numerically_across_digit_counts() {
        // "9.00" vs "10.00" would compare the wrong way as strings
        assert_eq!(
            classify_trend(recorded(dec!(9)), Price::new(dec!(10))),
            Trend::Up
        );
    }

    #[test]
    fn test_trend_compares_after_rounding() {
        // Both sides display as 10.00, so no arrow
        assert_eq!(
            classify_trend(recorded(dec!(10.001)), Price::new(dec!(9.998))),
            Trend::Neutral
        );
    }

    #[test]
    fn test_trend_arrows() {
        assert_eq!(Trend::Up.arrow(), Some("▲"));
        assert_eq!(Trend::Down.arrow(), Some("▼"));
        assert_eq!(Trend::Neutral.arrow(), None);
    }
}
