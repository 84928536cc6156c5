//! Constants for the ticker poller
//!
//! The poll interval and history window are fixed. The endpoint and request
//! timeout can be overridden from the command line, everything else is a
//! compile-time constant.

/// Ticker endpoint polled by default
pub const TICKER_URL: &str = "https://blockchain.info/ticker";

/// How long to wait between poll cycles (in seconds)
pub const POLL_INTERVAL_SECS: u64 = 10;

/// Number of most recent buy prices kept per currency
pub const HISTORY_SIZE: usize = 5;

/// HTTP request timeout when fetching the ticker (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Capacity of the ticker event broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Delimiter printed around each received snapshot
pub const DELIMITER: &str = "------------------------------------------------------";

/// User agent for HTTP requests
pub const USER_AGENT: &str = concat!("ticker-stats/", env!("CARGO_PKG_VERSION"));
