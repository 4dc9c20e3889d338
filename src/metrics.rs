//! Fetch health metrics collection and reporting
//!
//! Tracks outcome counters and the last observed latency for a provider.

use std::time::Duration;
use tokio::sync::RwLock;

/// Metrics snapshot for a single provider
#[derive(Debug, Clone)]
pub struct FetchMetrics {
    /// Name of the provider
    pub provider_name: String,
    /// Total number of requests tracked
    pub total_requests: u64,
    /// Number of failed requests
    pub failed_requests: u64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Latency of the most recent request in milliseconds
    pub last_latency_ms: Option<f64>,
}

impl FetchMetrics {
    /// Creates metrics with no data
    pub fn empty(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            total_requests: 0,
            failed_requests: 0,
            success_rate: 1.0,
            last_latency_ms: None,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    failed: u64,
    last_latency_ms: Option<f64>,
}

/// Collects and computes fetch metrics for a provider
pub struct MetricsCollector {
    /// Provider name
    provider_name: String,
    /// Outcome counters
    counters: RwLock<Counters>,
}

impl MetricsCollector {
    /// Creates a new metrics collector for a provider
    pub fn new(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            counters: RwLock::new(Counters::default()),
        }
    }

    /// Records a request with its duration and success status
    pub async fn record_request(&self, duration: Duration, success: bool) {
        let mut counters = self.counters.write().await;
        counters.total += 1;
        if !success {
            counters.failed += 1;
        }
        counters.last_latency_ms = Some(duration.as_secs_f64() * 1000.0);
    }

    /// Computes current metrics from the recorded outcomes
    pub async fn get_metrics(&self) -> FetchMetrics {
        let counters = self.counters.read().await;

        if counters.total == 0 {
            return FetchMetrics::empty(&self.provider_name);
        }

        FetchMetrics {
            provider_name: self.provider_name.clone(),
            total_requests: counters.total,
            failed_requests: counters.failed,
            success_rate: (counters.total - counters.failed) as f64 / counters.total as f64,
            last_latency_ms: counters.last_latency_ms,
        }
    }
}
