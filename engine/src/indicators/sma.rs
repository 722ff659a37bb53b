// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::utils::mean;

/// SMA over `period` closes. Output is aligned with `prices`; the first
/// `period - 1` positions are `None`. Empty input or a zero period yields an empty series.
pub fn sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if prices.is_empty() || period == 0 {
        return Vec::new();
    }
    if prices.len() < period {
        return vec![None; prices.len()];
    }

    let mut results = vec![None; period - 1];
    // Each window is summed on its own so every value is exactly the mean of its window
    results.extend(prices.windows(period).map(mean));
    results
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>> {
        sma(prices, self.period)
    }
}
