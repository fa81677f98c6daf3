//! Runtime configuration
//!
//! Resolved from defaults, then `PRICEDASH_*` environment variables
//! (optionally from a `.env` file), then command-line flags.

use std::time::Duration;

use crate::services::JoinPolicy;
use crate::types::{PricedashError, Result};

/// Pricing API base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Products 1..=10
pub const DEFAULT_PRODUCT_COUNT: u32 = 10;

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "PRICEDASH_API_URL";
pub const ENV_PRODUCT_COUNT: &str = "PRICEDASH_PRODUCT_COUNT";
pub const ENV_TIMEOUT_SECS: &str = "PRICEDASH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without a trailing slash
    pub base_url: String,
    pub product_count: u32,
    /// Per-request transport timeout
    pub request_timeout: Duration,
    pub join_policy: JoinPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            product_count: DEFAULT_PRODUCT_COUNT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            join_policy: JoinPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(&url)?;
        }
        if let Some(count) = lookup(ENV_PRODUCT_COUNT) {
            let count = count.trim().parse().map_err(|_| {
                PricedashError::Config(format!("{} must be a number: {}", ENV_PRODUCT_COUNT, count))
            })?;
            config = config.with_product_count(count)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse().map_err(|_| {
                PricedashError::Config(format!("{} must be a number: {}", ENV_TIMEOUT_SECS, secs))
            })?;
            config = config.with_timeout_secs(secs)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(url)?;
        Ok(self)
    }

    pub fn with_product_count(mut self, count: u32) -> Result<Self> {
        if count == 0 {
            return Err(PricedashError::Config(
                "product count must be at least 1".into(),
            ));
        }
        self.product_count = count;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(PricedashError::Config(
                "timeout must be at least 1 second".into(),
            ));
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn with_join_policy(mut self, policy: JoinPolicy) -> Self {
        self.join_policy = policy;
        self
    }
}

/// Validate an http(s) base URL and strip trailing slashes
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| PricedashError::Config(format!("invalid API url {:?}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(PricedashError::Config(format!(
            "unsupported API url scheme: {}",
            other
        ))),
    }
}
