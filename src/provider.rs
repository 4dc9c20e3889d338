//! Provider abstraction for fetching trading post prices

use crate::{
    error::ProviderError,
    types::{Item, Price},
};
use async_trait::async_trait;

/// Trait for trading post price providers
///
/// The price state container invokes this exactly once per activation.
#[async_trait]
pub trait TradingPostProvider: Send + Sync {
    /// Fetches current prices for the given items in a single request
    ///
    /// # Arguments
    /// * `items` - Slice of items to fetch prices for
    ///
    /// # Returns
    /// Prices in upstream response order, or an error if the fetch fails.
    /// Items unknown to the upstream service are silently absent from the
    /// result; that is upstream behavior and is not validated here.
    async fn fetch_prices(&self, items: &[Item]) -> Result<Vec<Price>, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock provider for testing
    ///
    /// Holds one scripted response; the container fetches once, so the
    /// response is consumed by the first call.
    pub struct MockProvider {
        response: Mutex<Option<Result<Vec<Price>, ProviderError>>>,
        call_count: Mutex<usize>,
    }

    impl Default for MockProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self {
                response: Mutex::new(None),
                call_count: Mutex::new(0),
            }
        }

        pub fn set_prices(&self, prices: Vec<Price>) {
            *self.response.lock().unwrap() = Some(Ok(prices));
        }

        pub fn set_error(&self, error: ProviderError) {
            *self.response.lock().unwrap() = Some(Err(error));
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl TradingPostProvider for MockProvider {
        async fn fetch_prices(&self, _items: &[Item]) -> Result<Vec<Price>, ProviderError> {
            *self.call_count.lock().unwrap() += 1;
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ProviderError::ApiError("no scripted response".to_string())))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
