use thiserror::Error;

use super::ProductId;

/// Remote resource fetched per product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    SuggestedPrice,
    ProductInfo,
    PriceHistory,
}

impl Resource {
    /// Path segment under the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::SuggestedPrice => "suggest-price",
            Self::ProductInfo => "products",
            Self::PriceHistory => "price-history",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::SuggestedPrice => "suggested price",
            Self::ProductInfo => "product info",
            Self::PriceHistory => "price history",
        };
        f.write_str(label)
    }
}

/// pricedash error types
#[derive(Error, Debug)]
pub enum PricedashError {
    /// Network error, non-2xx status or malformed payload
    #[error("failed to fetch {resource} for product {id}: {reason}")]
    Fetch {
        resource: Resource,
        id: ProductId,
        reason: String,
    },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PricedashError {
    pub fn fetch(resource: Resource, id: ProductId, reason: impl Into<String>) -> Self {
        Self::Fetch {
            resource,
            id,
            reason: reason.into(),
        }
    }
}

/// Result type alias for pricedash
pub type Result<T> = std::result::Result<T, PricedashError>;
