//! Product and price-history types for the pricing API

use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, PrevPrice};

/// Positive product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(NonZeroU32);

impl ProductId {
    /// Returns None for zero
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Identifiers 1..=count in ascending order
    pub fn range(count: u32) -> impl Iterator<Item = ProductId> {
        (1..=count).filter_map(Self::new)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid product id: {}", s))?;
        Self::new(n).ok_or_else(|| "product id must be positive".to_string())
    }
}

/// `GET /suggest-price/{id}/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestedPrice {
    pub suggested_price: Decimal,
}

/// `GET /products/{id}/` (only the fields the dashboard shows)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub category: String,
}

/// One element of `GET /price-history/{id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub date: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

impl PriceHistoryEntry {
    /// Calendar date of the observation, if the date string is ISO formatted
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Last entry by position, or "N/A" for an empty history
pub fn prev_price_from_history(history: &[PriceHistoryEntry]) -> PrevPrice {
    match history.last() {
        Some(entry) => PrevPrice::Recorded(Price::new(entry.price)),
        None => PrevPrice::NotAvailable,
    }
}

/// Whether the dates never go backwards (ISO dates compare as strings)
pub fn is_chronological(history: &[PriceHistoryEntry]) -> bool {
    history.windows(2).all(|w| w[0].date <= w[1].date)
}

/// Display-ready record merged from the three per-product resources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedProduct {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub prev_price: PrevPrice,
}

impl PricedProduct {
    pub fn from_parts(
        id: ProductId,
        suggested: SuggestedPrice,
        info: ProductInfo,
        history: &[PriceHistoryEntry],
    ) -> Self {
        Self {
            id,
            name: info.name,
            category: info.category,
            price: Price::new(suggested.suggested_price),
            prev_price: prev_price_from_history(history),
        }
    }
}
