//! Fetch health metrics collection and reporting
//!
//! Tracks fetch latencies and success rates for the ticker provider.

use std::collections::VecDeque;
use std::time::Duration;

/// Maximum number of samples to keep for metrics calculation
const MAX_SAMPLES: usize = 100;

/// Point-in-time view of fetch health
#[derive(Debug, Clone, PartialEq)]
pub struct FetchMetrics {
    /// Name of the provider
    pub provider_name: String,
    /// 50th percentile latency of successful fetches in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful fetches in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total number of fetches
    pub total_fetches: u64,
    /// Number of failed fetches
    pub failed_fetches: u64,
}

impl FetchMetrics {
    /// Creates metrics with no data
    pub fn empty(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_fetches: 0,
            failed_fetches: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

/// Collects fetch samples for one provider
///
/// Owned by the poll loop, so no locking is involved.
#[derive(Debug)]
pub struct MetricsCollector {
    provider_name: String,
    samples: VecDeque<LatencySample>,
    total_fetches: u64,
    failed_fetches: u64,
}

impl MetricsCollector {
    /// Creates a new metrics collector for a provider
    pub fn new(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            samples: VecDeque::with_capacity(MAX_SAMPLES),
            total_fetches: 0,
            failed_fetches: 0,
        }
    }

    /// Records a fetch with its duration and success status
    pub fn record_fetch(&mut self, duration: Duration, success: bool) {
        self.total_fetches += 1;
        if !success {
            self.failed_fetches += 1;
        }

        if self.samples.len() >= MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes current metrics from collected samples
    pub fn metrics(&self) -> FetchMetrics {
        if self.samples.is_empty() {
            return FetchMetrics::empty(&self.provider_name);
        }

        let mut latencies: Vec<f64> = self
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(f64::total_cmp);

        let success_rate = if self.total_fetches > 0 {
            (self.total_fetches - self.failed_fetches) as f64 / self.total_fetches as f64
        } else {
            1.0
        };

        FetchMetrics {
            provider_name: self.provider_name.clone(),
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_fetches: self.total_fetches,
            failed_fetches: self.failed_fetches,
        }
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector() {
        let mut collector = MetricsCollector::new("test");

        collector.record_fetch(Duration::from_millis(100), true);
        collector.record_fetch(Duration::from_millis(200), true);
        collector.record_fetch(Duration::from_millis(150), false);

        let metrics = collector.metrics();

        assert_eq!(metrics.provider_name, "test");
        assert_eq!(metrics.total_fetches, 3);
        assert_eq!(metrics.failed_fetches, 1);
        assert!(metrics.success_rate > 0.6 && metrics.success_rate < 0.7);
        // failed fetch latency is excluded
        assert_eq!(metrics.latency_p99_ms, 200.0);
    }

    #[test]
    fn test_empty_collector() {
        let collector = MetricsCollector::new("test");
        assert_eq!(collector.metrics(), FetchMetrics::empty("test"));
    }

    #[test]
    fn test_window_is_bounded() {
        let mut collector = MetricsCollector::new("test");
        for _ in 0..(MAX_SAMPLES + 20) {
            collector.record_fetch(Duration::from_millis(10), true);
        }

        assert_eq!(collector.samples.len(), MAX_SAMPLES);
        assert_eq!(collector.metrics().total_fetches, (MAX_SAMPLES + 20) as u64);
    }

    #[test]
    fn test_percentile() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&values, 50.0), 5.0);
        assert_eq!(percentile(&values, 99.0), 10.0);
    }
}
