//! Rolling per-currency history of recent buy prices

use crate::{constants::HISTORY_SIZE, types::Snapshot};
use std::collections::VecDeque;

/// Rolling window of the most recent buy prices per currency
///
/// Owned by the poll loop and updated once per successful fetch. Currencies
/// are iterated in the order they were first seen.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    window: usize,
    prices: Vec<(String, VecDeque<f64>)>,
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceHistory {
    /// Creates an empty history with the default window
    pub fn new() -> Self {
        Self::with_window(HISTORY_SIZE)
    }

    /// Creates an empty history keeping at most `window` prices per currency
    ///
    /// A zero window is raised to one so the latest price is always kept.
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            prices: Vec::new(),
        }
    }

    /// Maximum number of prices kept per currency
    pub fn window(&self) -> usize {
        self.window
    }

    /// Records the buy price of every currency in the snapshot
    ///
    /// Every tracked currency is trimmed to the window afterwards, including
    /// ones that did not appear in this snapshot.
    pub fn track(&mut self, snapshot: &Snapshot) {
        for (currency, record) in snapshot.iter() {
            match self.prices.iter_mut().find(|(tracked, _)| tracked == currency) {
                Some((_, prices)) => prices.push_back(record.buy),
                None => self
                    .prices
                    .push((currency.to_string(), VecDeque::from([record.buy]))),
            }
        }

        for (_, prices) in self.prices.iter_mut() {
            while prices.len() > self.window {
                prices.pop_front();
            }
        }
    }

    /// Prices tracked for a currency, oldest first
    pub fn prices(&self, currency: &str) -> Option<&VecDeque<f64>> {
        self.prices
            .iter()
            .find(|(tracked, _)| tracked == currency)
            .map(|(_, prices)| prices)
    }

    /// Number of tracked currencies
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// True if nothing has been tracked yet
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Renders one `CUR: a -> b -> c` line per tracked currency
    pub fn trend_lines(&self) -> Vec<String> {
        self.prices
            .iter()
            .map(|(currency, prices)| {
                let trend = prices
                    .iter()
                    .map(|price| format_price(*price))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                format!("{}: {}", currency, trend)
            })
            .collect()
    }
}

/// Formats a price with two decimals and comma thousands separators
///
/// `1234567.891` renders as `1,234,567.89`.
pub fn format_price(price: f64) -> String {
    let formatted = format!("{:.2}", price.abs());
    let Some((whole, fraction)) = formatted.split_once('.') else {
        // NaN and infinities
        return format!("{:.2}", price);
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price.is_sign_negative() && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}
