//! Sleep abstraction used between poll cycles

use async_trait::async_trait;
use std::time::Duration;

/// Something the poll loop can wait on between cycles
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::watch;

    /// Sleeper that returns immediately and records what it was asked for
    ///
    /// With a shutdown sender attached, the signal is fired once the given
    /// number of sleeps has been requested.
    #[derive(Default)]
    pub struct RecordingSleeper {
        requested: Arc<Mutex<Vec<Duration>>>,
        stop_after: Option<(usize, watch::Sender<bool>)>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn stopping_after(sleeps: usize, shutdown: watch::Sender<bool>) -> Self {
            Self {
                requested: Arc::new(Mutex::new(Vec::new())),
                stop_after: Some((sleeps, shutdown)),
            }
        }

        pub fn requested(&self) -> Vec<Duration> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            let count = {
                let mut requested = self.requested.lock().unwrap();
                requested.push(duration);
                requested.len()
            };

            if let Some((limit, shutdown)) = &self.stop_after {
                if count >= *limit {
                    let _ = shutdown.send(true);
                }
            }
        }
    }
}
