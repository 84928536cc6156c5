//! # Ticker Statistics
//!
//! Polls a cryptocurrency ticker (blockchain.info by default) on a fixed
//! interval, prints descriptive statistics over the buy prices of every
//! currency, and keeps a short rolling history of buy prices per currency.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use ticker_stats::{BlockchainInfoProvider, TickerPoller, TokioSleeper};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(BlockchainInfoProvider::new()?);
//! let mut poller = TickerPoller::new(provider, Arc::new(TokioSleeper), std::io::stdout());
//!
//! // One fetch, report and history update
//! poller.run_cycle().await?;
//! for line in poller.history().trend_lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! TickerPoller::run (every 10s until shutdown)
//!     ↓
//! TickerProvider (blockchain.info)
//!     ↓
//! PriceStatistics (mean, median, population std dev)
//!     ↓
//! PriceHistory (last 5 buy prices per currency)
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures never stop the loop. Non-200 responses, transport errors
//! and undecodable bodies all surface as [`FetchError`] and are printed as
//! `Error fetching data: ...` before the usual wait.

pub mod clock;
pub mod constants;
pub mod error;
pub mod history;
pub mod metrics;
pub mod poller;
pub mod provider;
pub mod providers;
pub mod statistics;
pub mod types;

// Re-export commonly used types
pub use clock::{Sleeper, TokioSleeper};
pub use error::{FetchError, StatisticsError};
pub use history::PriceHistory;
pub use metrics::FetchMetrics;
pub use poller::TickerPoller;
pub use provider::TickerProvider;
pub use providers::BlockchainInfoProvider;
pub use statistics::PriceStatistics;
pub use types::{CycleOutcome, Snapshot, TickerEvent, TickerRecord};
