//! # Guild Wars 2 Trading Post Price SDK
//!
//! Fetches current trading post prices for a fixed set of tradable items
//! from the public Guild Wars 2 commerce API and publishes them to any
//! number of in-process consumers.
//!
//! The fetch is one-shot: a container fetches the price list exactly once
//! per activation and publishes the evolving request state (loading, then
//! success or failure) to every subscriber. There is no retry, no polling
//! and no caching; consumers render their own fallback when the state
//! carries an error.
//!
//! ## Usage
//!
//! ```no_run
//! use gw2_tp_prices::TpPriceTracker;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TpPriceTracker::new()?;
//! let handle = tracker.subscribe();
//!
//! // One fetch per container lifetime
//! tracker.activate().await;
//!
//! let state = handle.current().await?;
//! if let Some(prices) = &state.prices {
//!     for price in prices {
//!         println!("{}: buy {}c, sell {}c", price.id, price.buy, price.sell);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod store;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use error::{ProviderError, StateError};
pub use metrics::FetchMetrics;
pub use providers::Gw2CommerceProvider;
pub use store::TpPricesHandle;
pub use tracker::TpPriceTracker;
pub use types::{Item, Price, RequestState};
