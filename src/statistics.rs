//! Descriptive statistics over the buy prices of a snapshot

use crate::{error::StatisticsError, types::Snapshot};

/// Summary of the buy prices across every currency of one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStatistics {
    /// Number of prices summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Midpoint of the sorted prices
    pub median: f64,
    /// Population standard deviation (divides by N)
    pub std_dev: f64,
    /// Lowest buy price
    pub min: f64,
    /// Highest buy price
    pub max: f64,
}

impl PriceStatistics {
    /// Summarizes the buy prices of a snapshot
    ///
    /// # Returns
    /// The statistics, or `EmptySnapshot` if there is nothing to summarize
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, StatisticsError> {
        Self::from_prices(snapshot.buy_prices())
    }

    /// Summarizes an arbitrary set of prices
    pub fn from_prices(mut prices: Vec<f64>) -> Result<Self, StatisticsError> {
        if prices.is_empty() {
            return Err(StatisticsError::EmptySnapshot);
        }

        let count = prices.len();
        let mean = prices.iter().sum::<f64>() / count as f64;
        let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count as f64;

        prices.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (prices[mid - 1] + prices[mid]) / 2.0
        } else {
            prices[mid]
        };

        Ok(Self {
            count,
            mean,
            median,
            std_dev: variance.sqrt(),
            min: prices[0],
            max: prices[count - 1],
        })
    }
}

/// Renders the three console lines at full precision
impl std::fmt::Display for PriceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mean Buy Price: {:?}", self.mean)?;
        writeln!(f, "Median Buy Price: {:?}", self.median)?;
        write!(f, "Standard Deviation of Buy Prices: {:?}", self.std_dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_currency() {
        let snapshot: Snapshot = [("USD", 100.0)].into_iter().collect();
        let stats = PriceStatistics::from_snapshot(&snapshot).unwrap();

        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 100.0);
        assert_eq!(stats.median, 100.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_two_currencies_use_population_std_dev() {
        let snapshot: Snapshot = [("USD", 10.0), ("EUR", 20.0)].into_iter().collect();
        let stats = PriceStatistics::from_snapshot(&snapshot).unwrap();

        assert_eq!(stats.mean, 15.0);
        assert_eq!(stats.median, 15.0);
        // sample std dev would be ~7.07
        assert_eq!(stats.std_dev, 5.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 20.0);
    }

    #[test]
    fn test_median_odd_count_ignores_input_order() {
        let stats = PriceStatistics::from_prices(vec![9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_median_even_count_averages_central_values() {
        let stats = PriceStatistics::from_prices(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_known_distribution() {
        let stats =
            PriceStatistics::from_prices(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(approx_eq(stats.mean, 5.0));
        assert!(approx_eq(stats.std_dev, 2.0));
        assert!(approx_eq(stats.median, 4.5));
    }

    #[test]
    fn test_empty_snapshot() {
        let result = PriceStatistics::from_snapshot(&Snapshot::new());
        assert_eq!(result, Err(StatisticsError::EmptySnapshot));
    }

    #[test]
    fn test_display() {
        let stats = PriceStatistics::from_prices(vec![10.0, 20.0]).unwrap();
        assert_eq!(
            stats.to_string(),
            "Mean Buy Price: 15.0\n\
             Median Buy Price: 15.0\n\
             Standard Deviation of Buy Prices: 5.0"
        );
    }

    #[test]
    fn test_display_keeps_small_deviation() {
        let stats = PriceStatistics::from_prices(vec![1000.0, 1000.008]).unwrap();
        let rendered = stats.to_string();

        assert!(rendered.ends_with(&format!(
            "Standard Deviation of Buy Prices: {:?}",
            stats.std_dev
        )));
        assert!(!rendered.ends_with("Buy Prices: 0.0"));
        assert!(stats.std_dev > 0.003 && stats.std_dev < 0.005);
    }
}
