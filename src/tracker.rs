//! Trading post price state container
//!
//! Owns the one-shot price fetch and publishes its lifecycle to subscribers.

use crate::{
    constants::TRACKED_ITEMS,
    error::ProviderError,
    metrics::{FetchMetrics, MetricsCollector},
    provider::TradingPostProvider,
    providers::Gw2CommerceProvider,
    store::{TpPricesHandle, TpPricesStore},
    types::RequestState,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Trading post price state container
///
/// Triggers exactly one invocation of the price provider per container
/// lifetime and publishes the evolving request state to every subscriber.
/// The container is the single writer of the state; subscribers only read.
///
/// # Example
/// ```no_run
/// use gw2_tp_prices::TpPriceTracker;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = TpPriceTracker::new()?;
/// let handle = tracker.subscribe();
///
/// tracker.activate().await;
///
/// let state = handle.current().await?;
/// if let Some(prices) = &state.prices {
///     for price in prices {
///         println!("{}: buy {} sell {}", price.id, price.buy, price.sell);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct TpPriceTracker {
    store: Arc<TpPricesStore>,
    provider: Arc<dyn TradingPostProvider>,
    metrics: Arc<MetricsCollector>,
    activation: Arc<OnceCell<()>>,
}

impl TpPriceTracker {
    /// Creates a tracker backed by the commerce API provider
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self::with_provider(Arc::new(Gw2CommerceProvider::new()?)))
    }

    /// Creates a tracker with a custom provider
    ///
    /// This is primarily for testing with mock providers.
    pub fn with_provider(provider: Arc<dyn TradingPostProvider>) -> Self {
        let store = Arc::new(TpPricesStore::new());
        let metrics = Arc::new(MetricsCollector::new(provider.provider_name()));

        Self {
            store,
            provider,
            metrics,
            activation: Arc::new(OnceCell::new()),
        }
    }

    /// Runs the one-shot price fetch and publishes its lifecycle
    ///
    /// The first call moves the state to loading, invokes the provider and
    /// settles into success or failure. Later calls do not refetch; they
    /// await the same completion.
    pub async fn activate(&self) {
        let provider = self.provider.clone();
        let store = self.store.clone();
        let metrics = self.metrics.clone();

        self.activation
            .get_or_init(|| async move {
                Self::fetch_and_publish(&provider, &store, &metrics).await;
            })
            .await;
    }

    /// Spawns the activation on a background task
    ///
    /// For owners that mount the container and read the state later rather
    /// than awaiting the fetch in place. Coalesces with [`activate`] on the
    /// same single fetch.
    ///
    /// [`activate`]: TpPriceTracker::activate
    pub fn start(&self) {
        let provider = self.provider.clone();
        let store = self.store.clone();
        let metrics = self.metrics.clone();
        let activation = self.activation.clone();

        tokio::spawn(async move {
            activation
                .get_or_init(|| async {
                    Self::fetch_and_publish(&provider, &store, &metrics).await;
                })
                .await;
        });
    }

    /// Fetches prices once and publishes the resulting state
    async fn fetch_and_publish(
        provider: &Arc<dyn TradingPostProvider>,
        store: &Arc<TpPricesStore>,
        metrics: &Arc<MetricsCollector>,
    ) {
        store.transition(RequestState::loading()).await;

        let start = Instant::now();
        match provider.fetch_prices(TRACKED_ITEMS).await {
            Ok(prices) => {
                tracing::debug!(
                    count = prices.len(),
                    provider = provider.provider_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Fetched trading post prices"
                );
                metrics.record_request(start.elapsed(), true).await;
                store.transition(RequestState::success(prices)).await;
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.provider_name(),
                    error = %e,
                    "Failed to fetch trading post prices"
                );
                metrics.record_request(start.elapsed(), false).await;
                store.transition(RequestState::failure(e)).await;
            }
        }
    }

    /// Creates a read handle subscribed to state transitions
    pub fn subscribe(&self) -> TpPricesHandle {
        TpPricesStore::subscribe(&self.store)
    }

    /// Gets a snapshot of the current request state
    pub async fn state(&self) -> RequestState {
        self.store.current().await
    }

    /// Returns the name of the current provider
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Gets fetch metrics for the current provider
    pub async fn metrics(&self) -> FetchMetrics {
        self.metrics.get_metrics().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use crate::types::Price;

    fn sword_and_shield() -> Vec<Price> {
        vec![
            Price {
                id: 1,
                buy: 100,
                sell: 150,
            },
            Price {
                id: 2,
                buy: 50,
                sell: 80,
            },
        ]
    }

    #[tokio::test]
    async fn activation_publishes_fetched_prices() {
        let provider = Arc::new(MockProvider::new());
        provider.set_prices(sword_and_shield());
        let tracker = TpPriceTracker::with_provider(provider.clone());
        let handle = tracker.subscribe();

        let initial = tracker.state().await;
        assert!(!initial.loading);
        assert!(!initial.is_terminal());

        tracker.activate().await;

        let state = handle.current().await.expect("container is alive");
        assert!(state.loaded);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.prices, Some(sword_and_shield()));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn activation_invokes_the_provider_once() {
        let provider = Arc::new(MockProvider::new());
        provider.set_prices(sword_and_shield());
        let tracker = TpPriceTracker::with_provider(provider.clone());

        tracker.activate().await;
        tracker.activate().await;

        assert_eq!(provider.call_count(), 1);
        assert!(tracker.state().await.loaded);
    }

    #[tokio::test]
    async fn provider_failure_is_published_as_error() {
        let provider = Arc::new(MockProvider::new());
        provider.set_error(ProviderError::ApiError(
            "HTTP 500 Internal Server Error".to_string(),
        ));
        let tracker = TpPriceTracker::with_provider(provider);

        tracker.activate().await;

        let state = tracker.state().await;
        assert!(state.error.is_some());
        assert!(state.prices.is_none());
        assert!(!state.loading);
        assert!(!state.loaded);

        let metrics = tracker.metrics().await;
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.failed_requests, 1);
    }

    #[tokio::test]
    async fn subscribers_observe_loading_then_terminal() {
        let provider = Arc::new(MockProvider::new());
        provider.set_prices(sword_and_shield());
        let tracker = TpPriceTracker::with_provider(provider);
        let mut handle = tracker.subscribe();

        tracker.start();

        let first = handle.changed().await.expect("container is alive");
        assert!(first.loading);

        let second = handle.changed().await.expect("container is alive");
        assert!(second.loaded);
        assert_eq!(second.prices, Some(sword_and_shield()));
    }
}
