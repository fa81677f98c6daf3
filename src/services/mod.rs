//! Services for fetching and deriving pricing data

pub mod aggregator;
pub mod api;
pub mod category;
pub mod trend;

pub use aggregator::{Aggregator, JoinPolicy};
pub use api::{HttpPricingApi, PricingApi};
pub use category::{category_icon, CategoryIcon};
pub use trend::{classify_trend, Trend};
