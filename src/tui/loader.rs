//! Background loader for the TUI
//!
//! A dedicated thread runs a single-threaded tokio runtime. The event loop
//! sends [`LoadRequest`]s without blocking and polls finished
//! [`LoadEvent`]s with [`Loader::try_recv`]. Every request hands back an
//! [`AbortHandle`] so the UI can cancel work it no longer needs.

use std::sync::{mpsc, Arc};
use std::thread;

use futures::future::{AbortHandle, AbortRegistration};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::services::{Aggregator, PricingApi};
use crate::types::{PriceHistoryEntry, PricedProduct, ProductId, Result};

/// Work the UI can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    Products,
    History(ProductId),
}

/// Finished work; aborted requests produce no event
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Products(Vec<PricedProduct>),
    History {
        id: ProductId,
        entries: Vec<PriceHistoryEntry>,
    },
}

/// Handle to the loader thread. Dropping it stops the thread and drops any
/// in-flight requests.
pub struct Loader {
    requests: UnboundedSender<(LoadRequest, AbortRegistration)>,
    events: mpsc::Receiver<LoadEvent>,
}

impl Loader {
    pub fn spawn<A: PricingApi + 'static>(aggregator: Aggregator<A>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (request_tx, mut request_rx) = unbounded_channel::<(LoadRequest, AbortRegistration)>();
        let (event_tx, event_rx) = mpsc::channel();
        let aggregator = Arc::new(aggregator);

        thread::Builder::new()
            .name("pricedash-loader".into())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some((request, registration)) = request_rx.recv().await {
                        let aggregator = Arc::clone(&aggregator);
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            if let Some(event) =
                                handle_request(&aggregator, request, registration).await
                            {
                                // Receiver gone means the UI has exited
                                let _ = event_tx.send(event);
                            }
                        });
                    }
                });
            })?;

        Ok(Self {
            requests: request_tx,
            events: event_rx,
        })
    }

    /// Queue a request; abort the returned handle to cancel it
    pub fn request(&self, request: LoadRequest) -> AbortHandle {
        let (handle, registration) = AbortHandle::new_pair();
        if self.requests.send((request, registration)).is_err() {
            log::error!("Loader thread stopped; dropping {:?}", request);
        }
        handle
    }

    /// Next finished event, if any (non-blocking)
    pub fn try_recv(&self) -> Option<LoadEvent> {
        self.events.try_recv().ok()
    }

    /// Block until the next event arrives (tests and one-shot callers)
    pub fn recv(&self) -> Option<LoadEvent> {
        self.events.recv().ok()
    }
}

async fn handle_request<A: PricingApi>(
    aggregator: &Aggregator<A>,
    request: LoadRequest,
    registration: AbortRegistration,
) -> Option<LoadEvent> {
    match request {
        LoadRequest::Products => aggregator
            .get_all_priced_products_abortable(registration)
            .await
            .map(LoadEvent::Products),
        LoadRequest::History(id) => aggregator
            .get_price_history_abortable(id, registration)
            .await
            .map(|entries| LoadEvent::History { id, entries }),
    }
}
