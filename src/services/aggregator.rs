//! Aggregator service merging per-product pricing resources
//!
//! For every product id the suggested price, product info and price history
//! are fetched concurrently and merged into a [`PricedProduct`]. All product
//! groups run concurrently too, so with the default ten products thirty
//! requests are in flight at once.

use futures::future::{self, AbortRegistration, Abortable};

use crate::services::api::PricingApi;
use crate::types::{is_chronological, PriceHistoryEntry, PricedProduct, ProductId, Result};

/// How failures of individual fetches affect the bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Every fetch must succeed; any failure yields an empty list
    #[default]
    AllOrNothing,
    /// Keep the products whose three fetches succeeded
    PartialSuccess,
}

/// Aggregator over a [`PricingApi`]
pub struct Aggregator<A> {
    api: A,
    product_count: u32,
    policy: JoinPolicy,
}

impl<A: PricingApi> Aggregator<A> {
    pub fn new(api: A, product_count: u32, policy: JoinPolicy) -> Self {
        Self {
            api,
            product_count,
            policy,
        }
    }

    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> {
        ProductId::range(self.product_count)
    }

    /// Fetch and merge every product, in id order.
    /// Failures are logged and never returned to the caller.
    pub async fn get_all_priced_products(&self) -> Vec<PricedProduct> {
        match self.policy {
            JoinPolicy::AllOrNothing => self.join_all_or_nothing().await,
            JoinPolicy::PartialSuccess => self.join_partial().await,
        }
    }

    /// [`get_all_priced_products`](Self::get_all_priced_products) that stops
    /// when the paired `AbortHandle` fires. Returns None when aborted.
    pub async fn get_all_priced_products_abortable(
        &self,
        registration: AbortRegistration,
    ) -> Option<Vec<PricedProduct>> {
        match Abortable::new(self.get_all_priced_products(), registration).await {
            Ok(products) => Some(products),
            Err(_) => {
                log::info!("Loading priced products aborted");
                None
            }
        }
    }

    /// Price history exactly as the source returns it; empty on failure.
    pub async fn get_price_history(&self, id: ProductId) -> Vec<PriceHistoryEntry> {
        match self.api.price_history(id).await {
            Ok(history) => history,
            Err(e) => {
                log::error!("Error fetching price history for product {}: {}", id, e);
                Vec::new()
            }
        }
    }

    /// [`get_price_history`](Self::get_price_history) that stops when the
    /// paired `AbortHandle` fires. Returns None when aborted.
    pub async fn get_price_history_abortable(
        &self,
        id: ProductId,
        registration: AbortRegistration,
    ) -> Option<Vec<PriceHistoryEntry>> {
        match Abortable::new(self.get_price_history(id), registration).await {
            Ok(history) => Some(history),
            Err(_) => {
                log::info!("Loading price history for product {} aborted", id);
                None
            }
        }
    }

    /// First failure drops the remaining in-flight requests
    async fn join_all_or_nothing(&self) -> Vec<PricedProduct> {
        let fetches = self.product_ids().map(|id| self.fetch_priced_product(id));
        match future::try_join_all(fetches).await {
            Ok(products) => products,
            Err(e) => {
                log::error!("Error fetching predicted prices: {}", e);
                Vec::new()
            }
        }
    }

    async fn join_partial(&self) -> Vec<PricedProduct> {
        let fetches = self.product_ids().map(|id| self.fetch_priced_product(id));
        future::join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(product) => Some(product),
                Err(e) => {
                    log::error!("Error fetching predicted price: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Three concurrent fetches for one product, merged once all succeed
    async fn fetch_priced_product(&self, id: ProductId) -> Result<PricedProduct> {
        let (suggested, info, history) = tokio::try_join!(
            self.api.suggested_price(id),
            self.api.product_info(id),
            self.api.price_history(id),
        )?;

        if !is_chronological(&history) {
            log::warn!(
                "Price history for product {} is not in date order; using last entry as previous price",
                id
            );
        }

        Ok(PricedProduct::from_parts(id, suggested, info, &history))
    }
}
