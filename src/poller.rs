//! Ticker poll loop
//!
//! Drives Fetching → Reporting | ErrorReported → Sleeping on a fixed
//! interval until the shutdown signal fires.

use crate::{
    clock::Sleeper,
    constants::{DELIMITER, EVENT_CHANNEL_CAPACITY, POLL_INTERVAL_SECS},
    error::FetchError,
    history::PriceHistory,
    metrics::{FetchMetrics, MetricsCollector},
    provider::TickerProvider,
    statistics::PriceStatistics,
    types::{CycleOutcome, Snapshot, TickerEvent},
};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, watch};

/// Polls a ticker provider and reports statistics and price trends
///
/// The poller owns the price history, so every cycle reads and updates the
/// same store. Console output goes to `out`; diagnostics go to `tracing`.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use ticker_stats::{BlockchainInfoProvider, TickerPoller, TokioSleeper};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Arc::new(BlockchainInfoProvider::new()?);
/// let mut poller = TickerPoller::new(provider, Arc::new(TokioSleeper), std::io::stdout());
/// let (_stop, shutdown) = tokio::sync::watch::channel(false);
/// poller.run(shutdown).await?;
/// # Ok(())
/// # }
/// ```
pub struct TickerPoller<W: Write> {
    provider: Arc<dyn TickerProvider>,
    sleeper: Arc<dyn Sleeper>,
    history: PriceHistory,
    metrics: MetricsCollector,
    events: broadcast::Sender<TickerEvent>,
    interval: Duration,
    out: W,
}

impl<W: Write> TickerPoller<W> {
    /// Creates a poller with an empty history and the fixed poll interval
    pub fn new(provider: Arc<dyn TickerProvider>, sleeper: Arc<dyn Sleeper>, out: W) -> Self {
        let metrics = MetricsCollector::new(provider.provider_name());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            provider,
            sleeper,
            history: PriceHistory::new(),
            metrics,
            events,
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            out,
        }
    }

    /// Subscribes to the events published after each cycle
    pub fn subscribe(&self) -> broadcast::Receiver<TickerEvent> {
        self.events.subscribe()
    }

    /// Price history accumulated so far
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Fetch metrics accumulated so far
    pub fn metrics(&self) -> FetchMetrics {
        self.metrics.metrics()
    }

    /// Console writer
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs cycles until `shutdown` carries `true` or its sender is dropped
    ///
    /// # Returns
    /// The number of cycles completed
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> io::Result<u64> {
        tracing::info!(
            provider = self.provider.provider_name(),
            poll_interval_secs = self.interval.as_secs(),
            "Starting ticker poll loop"
        );

        let mut cycles = 0u64;
        loop {
            if *shutdown.borrow() {
                break;
            }

            self.run_cycle().await?;
            cycles += 1;

            // Only a `true` or a dropped sender cuts the wait short
            let stopped = tokio::select! {
                _ = self.sleeper.sleep(self.interval) => false,
                _ = shutdown.wait_for(|stop| *stop) => true,
            };
            if stopped {
                break;
            }
        }

        tracing::info!(cycles, "Ticker poll loop stopped");
        Ok(cycles)
    }

    /// Performs one fetch and reports its outcome
    ///
    /// Fetch failures are reported and swallowed. Only a failure to write the
    /// console output is returned as an error.
    pub async fn run_cycle(&mut self) -> io::Result<CycleOutcome> {
        let start = Instant::now();
        let result = self.provider.fetch_snapshot().await;
        let latency = start.elapsed();
        self.metrics.record_fetch(latency, result.is_ok());

        let outcome = match result {
            Ok(snapshot) => {
                tracing::debug!(
                    currency_count = snapshot.len(),
                    latency_ms = latency.as_millis() as u64,
                    "Received ticker snapshot"
                );
                self.report_snapshot(&snapshot)?;
                CycleOutcome::Reported
            }
            Err(e) => {
                self.report_error(&e)?;
                CycleOutcome::ErrorReported
            }
        };

        let metrics = self.metrics.metrics();
        tracing::debug!(
            p50_ms = metrics.latency_p50_ms,
            p99_ms = metrics.latency_p99_ms,
            success_rate = metrics.success_rate,
            total_fetches = metrics.total_fetches,
            "Fetch metrics"
        );

        Ok(outcome)
    }

    fn report_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        writeln!(self.out, "{}", DELIMITER)?;
        writeln!(self.out, "New data received: {}", snapshot)?;
        writeln!(self.out, "{}", DELIMITER)?;

        let mean_buy = match PriceStatistics::from_snapshot(snapshot) {
            Ok(stats) => {
                writeln!(self.out, "{}", stats)?;
                Some(stats.mean)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping statistics");
                writeln!(self.out, "{}", e)?;
                None
            }
        };

        self.history.track(snapshot);
        for line in self.history.trend_lines() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;

        // No subscribers is fine
        let _ = self
            .events
            .send(TickerEvent::snapshot_received(snapshot.len(), mean_buy));
        Ok(())
    }

    fn report_error(&mut self, error: &FetchError) -> io::Result<()> {
        tracing::warn!(kind = error.kind(), error = %error, "Failed to fetch ticker");
        writeln!(self.out, "Error fetching data: {}", error)?;
        self.out.flush()?;

        let _ = self
            .events
            .send(TickerEvent::fetch_failed(error.kind(), error.to_string()));
        Ok(())
    }
}
