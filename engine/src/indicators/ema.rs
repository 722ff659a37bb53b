// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;

/// EMA seeded with the first value, k = 2 / (period + 1).
///
/// There is no warm-up gap: every input position gets a value. Empty input or a
/// zero period yields an empty series.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous_ema = values[0];
    results.push(previous_ema);

    for value in &values[1..] {
        let current = value * multiplier + previous_ema * (1.0 - multiplier);
        results.push(current);
        previous_ema = current;
    }
    results
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>> {
        ema(prices, self.period).into_iter().map(Some).collect()
    }
}
