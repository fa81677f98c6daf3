//! Pricing API client
//!
//! The dashboard only reads three per-product resources. [`PricingApi`] is the
//! seam the aggregator fetches through; [`HttpPricingApi`] talks to the real
//! service over HTTP.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::types::{
    PriceHistoryEntry, PricedashError, ProductId, ProductInfo, Resource, Result, SuggestedPrice,
};

/// Source of per-product pricing data
pub trait PricingApi: Send + Sync {
    fn suggested_price(&self, id: ProductId)
        -> impl Future<Output = Result<SuggestedPrice>> + Send;

    fn product_info(&self, id: ProductId) -> impl Future<Output = Result<ProductInfo>> + Send;

    fn price_history(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Vec<PriceHistoryEntry>>> + Send;
}

/// [`PricingApi`] backed by the pricing service's REST endpoints
#[derive(Debug, Clone)]
pub struct HttpPricingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPricingApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PricedashError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// e.g. `http://127.0.0.1:8000/api/price-history/3/`
    pub fn endpoint_url(&self, resource: Resource, id: ProductId) -> String {
        format!("{}/{}/{}/", self.base_url, resource.path(), id)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource, id: ProductId) -> Result<T> {
        let url = self.endpoint_url(resource, id);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PricedashError::fetch(resource, id, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricedashError::fetch(
                resource,
                id,
                format!("HTTP status {}", status),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PricedashError::fetch(resource, id, format!("JSON parse error: {}", e)))
    }
}

impl PricingApi for HttpPricingApi {
    async fn suggested_price(&self, id: ProductId) -> Result<SuggestedPrice> {
        self.get_json(Resource::SuggestedPrice, id).await
    }

    async fn product_info(&self, id: ProductId) -> Result<ProductInfo> {
        self.get_json(Resource::ProductInfo, id).await
    }

    async fn price_history(&self, id: ProductId) -> Result<Vec<PriceHistoryEntry>> {
        self.get_json(Resource::PriceHistory, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ProductId {
        ProductId::new(n).unwrap()
    }

    #[test]
    fn test_endpoint_urls_default_base() {
        let api = HttpPricingApi::new(&Config::default()).unwrap();

        assert_eq!(
            api.endpoint_url(Resource::SuggestedPrice, id(1)),
            "http://127.0.0.1:8000/api/suggest-price/1/"
        );
        assert_eq!(
            api.endpoint_url(Resource::ProductInfo, id(2)),
            "http://127.0.0.1:8000/api/products/2/"
        );
        assert_eq!(
            api.endpoint_url(Resource::PriceHistory, id(10)),
            "http://127.0.0.1:8000/api/price-history/10/"
        );
    }

    #[test]
    fn test_endpoint_url_custom_base() {
        let config = Config::default()
            .with_base_url("https://pricing.example.com/v2/")
            .unwrap();
        let api = HttpPricingApi::new(&config).unwrap();

        assert_eq!(
            api.endpoint_url(Resource::ProductInfo, id(7)),
            "https://pricing.example.com/v2/products/7/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_error() {
        // Port 9 (discard) on localhost refuses connections on test machines
        let config = Config::default()
            .with_base_url("http://127.0.0.1:9/api")
            .unwrap()
            .with_timeout_secs(2)
            .unwrap();
        let api = HttpPricingApi::new(&config).unwrap();

        let err = api.product_info(id(1)).await.unwrap_err();
        assert!(matches!(
            err,
            PricedashError::Fetch {
                resource: Resource::ProductInfo,
                ..
            }
        ));
    }
}
