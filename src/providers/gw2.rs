//! Guild Wars 2 commerce API price provider implementation

use crate::{
    constants::{COMMERCE_PRICES_ENDPOINT, GW2_API_URL, USER_AGENT},
    error::ProviderError,
    provider::TradingPostProvider,
    types::{Item, Price},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Commerce API response element for a single item
///
/// Only the fields the flattening surfaces are declared; `whitelisted` and
/// the order quantities ride along on the wire and are dropped by serde.
#[derive(Debug, Deserialize)]
struct Gw2PriceResponse {
    id: u32,
    buys: Gw2OrderSummary,
    sells: Gw2OrderSummary,
}

#[derive(Debug, Deserialize)]
struct Gw2OrderSummary {
    unit_price: u32,
}

/// Guild Wars 2 commerce API price provider
pub struct Gw2CommerceProvider {
    client: Client,
}

impl Gw2CommerceProvider {
    /// Creates a new commerce API provider
    ///
    /// No request timeout is configured; the transport default applies.
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self { client })
    }

    /// Builds the commerce API URL for fetching prices
    fn build_url(&self, items: &[Item]) -> String {
        let ids = items
            .iter()
            .map(|i| i.item_id().to_string())
            .collect::<Vec<_>>()
            .join(",");

        format!("{}{}?ids={}", GW2_API_URL, COMMERCE_PRICES_ENDPOINT, ids)
    }

    /// Flattens the commerce response into price records, preserving order
    fn parse_response(&self, response: Vec<Gw2PriceResponse>) -> Vec<Price> {
        response
            .into_iter()
            .map(|r| Price {
                id: r.id,
                buy: r.buys.unit_price,
                sell: r.sells.unit_price,
            })
            .collect()
    }
}

#[async_trait]
impl TradingPostProvider for Gw2CommerceProvider {
    async fn fetch_prices(&self, items: &[Item]) -> Result<Vec<Price>, ProviderError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_url(items);
        tracing::debug!(url = %url, "Fetching trading post prices");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::NetworkError)?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let response_text = response.text().await.map_err(ProviderError::NetworkError)?;

        let price_response: Vec<Gw2PriceResponse> =
            serde_json::from_str(&response_text).map_err(|e| {
                ProviderError::InvalidResponse(format!(
                    "Failed to parse commerce response: {}. Response: {}",
                    e, response_text
                ))
            })?;

        let prices = self.parse_response(price_response);

        tracing::debug!(
            count = prices.len(),
            "Successfully fetched trading post prices"
        );

        Ok(prices)
    }

    fn provider_name(&self) -> &'static str {
        "gw2-commerce"
    }
}
