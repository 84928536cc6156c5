//! Provider abstraction for fetching ticker snapshots from external APIs

use crate::{error::FetchError, types::Snapshot};
use async_trait::async_trait;

/// Trait for ticker providers
///
/// Implementations fetch the full ticker (every currency) in one request.
#[async_trait]
pub trait TickerProvider: Send + Sync {
    /// Fetches the current ticker snapshot
    ///
    /// # Returns
    /// The parsed snapshot, or an error describing why no snapshot is available
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
