//! Types for the ticker poller

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Ticker record for a single currency
///
/// Only `buy` is required. The remaining fields are kept when the endpoint
/// sends them so the raw snapshot can be echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Buy price
    pub buy: f64,

    /// Delayed (15 minute) market price
    #[serde(rename = "15m", default, skip_serializing_if = "Option::is_none")]
    pub delayed: Option<f64>,

    /// Last traded price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,

    /// Sell price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell: Option<f64>,

    /// Currency symbol as reported by the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl TickerRecord {
    /// Creates a record carrying only a buy price
    pub fn with_buy(buy: f64) -> Self {
        Self {
            buy,
            delayed: None,
            last: None,
            sell: None,
            symbol: None,
        }
    }
}

/// One poll's parsed ticker data, currency code to record
///
/// Currencies keep the order in which the endpoint listed them. A repeated
/// currency replaces the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Vec<(String, TickerRecord)>);

impl Snapshot {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces the record for a currency
    pub fn insert(&mut self, currency: impl Into<String>, record: TickerRecord) {
        let currency = currency.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == currency) {
            Some((_, slot)) => *slot = record,
            None => self.0.push((currency, record)),
        }
    }

    /// Gets the record for a currency
    pub fn get(&self, currency: &str) -> Option<&TickerRecord> {
        self.0
            .iter()
            .find(|(existing, _)| existing == currency)
            .map(|(_, record)| record)
    }

    /// Number of currencies in the snapshot
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the snapshot carries no currencies
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over currencies and their records
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TickerRecord)> {
        self.0.iter().map(|(currency, record)| (currency.as_str(), record))
    }

    /// Buy prices of every currency, in listing order
    pub fn buy_prices(&self) -> Vec<f64> {
        self.0.iter().map(|(_, record)| record.buy).collect()
    }
}

impl<C: Into<String>> FromIterator<(C, f64)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (C, f64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (currency, buy) in iter {
            snapshot.insert(currency, TickerRecord::with_buy(buy));
        }
        snapshot
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (currency, record) in &self.0 {
            map.serialize_entry(currency, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object keyed by currency code")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
                let mut snapshot = Snapshot::new();
                while let Some((currency, record)) =
                    access.next_entry::<String, TickerRecord>()?
                {
                    snapshot.insert(currency, record);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&raw)
    }
}

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Snapshot was fetched, reported and tracked
    Reported,
    /// Fetch failed and the error was reported
    ErrorReported,
}

/// Ticker events published after every poll cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickerEvent {
    /// A snapshot was received and processed
    SnapshotReceived {
        id: Uuid,
        currencies: usize,
        mean_buy: Option<f64>,
        timestamp: DateTime<Utc>,
    },

    /// The fetch failed
    FetchFailed {
        id: Uuid,
        error_kind: String,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl TickerEvent {
    /// Creates a SnapshotReceived event stamped now
    pub fn snapshot_received(currencies: usize, mean_buy: Option<f64>) -> Self {
        Self::SnapshotReceived {
            id: Uuid::new_v4(),
            currencies,
            mean_buy,
            timestamp: Utc::now(),
        }
    }

    /// Creates a FetchFailed event stamped now
    pub fn fetch_failed(error_kind: &str, error_message: impl Into<String>) -> Self {
        Self::FetchFailed {
            id: Uuid::new_v4(),
            error_kind: error_kind.to_string(),
            error_message: error_message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            TickerEvent::SnapshotReceived { id, .. } => *id,
            TickerEvent::FetchFailed { id, .. } => *id,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            TickerEvent::SnapshotReceived { .. } => "SNAPSHOT_RECEIVED",
            TickerEvent::FetchFailed { .. } => "FETCH_FAILED",
        }
    }
}

impl std::fmt::Display for TickerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickerEvent::SnapshotReceived {
                currencies,
                mean_buy: Some(mean),
                ..
            } => write!(f, "Snapshot received: {} currencies, mean buy {:.2}", currencies, mean),
            TickerEvent::SnapshotReceived { currencies, .. } => {
                write!(f, "Snapshot received: {} currencies", currencies)
            }
            TickerEvent::FetchFailed { error_message, .. } => {
                write!(f, "Fetch failed: {}", error_message)
            }
        }
    }
}
