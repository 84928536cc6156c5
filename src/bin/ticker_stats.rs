//! Ticker statistics binary.
//!
//! Run with:
//! ```bash
//! ticker-stats --url https://blockchain.info/ticker
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use ticker_stats::constants::{REQUEST_TIMEOUT_SECS, TICKER_URL};
use ticker_stats::{BlockchainInfoProvider, TickerPoller, TokioSleeper};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ticker-stats")]
#[command(about = "Polls a cryptocurrency ticker and prints buy-price statistics and trends")]
struct Args {
    /// Ticker endpoint to poll
    #[arg(short, long, env = "TICKER_URL", default_value = TICKER_URL)]
    url: String,

    /// HTTP request timeout in seconds
    #[arg(short, long, env = "TICKER_REQUEST_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticker_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!("Starting ticker-stats");
    info!("  URL: {}", args.url);
    info!("  Request timeout: {}s", args.timeout_secs);

    let provider = BlockchainInfoProvider::with_url(&args.url, Duration::from_secs(args.timeout_secs))
        .context("failed to build HTTP client")?;

    let (stop, shutdown) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping");
                let _ = stop.send(true);
            }
            Err(e) => {
                warn!(error = %e, "Unable to listen for Ctrl-C, polling until killed");
                let _stop = stop;
                std::future::pending::<()>().await;
            }
        }
    });

    let mut poller = TickerPoller::new(Arc::new(provider), Arc::new(TokioSleeper), std::io::stdout());
    poller.run(shutdown).await.context("failed to write report")?;

    Ok(())
}
