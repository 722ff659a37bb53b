// Relative Strength Index (RSI) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;

pub const DEFAULT_RSI_PERIOD: usize = 14;

// Value used for RS when the smoothed average loss is zero
const ZERO_LOSS_RS: f64 = 100.0;
const NEUTRAL_RSI: f64 = 50.0;

/// RSI with Wilder smoothing.
///
/// Averages are seeded with the mean of the first `period` gains/losses; output
/// index `i` is the RSI after the price change ending at price `i`, and the
/// first `period` positions are `None`. Fewer than two prices (or a zero period)
/// yields an empty series.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if prices.len() < 2 || period == 0 {
        return Vec::new();
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change) // losses are positive values
            }
        })
        .unzip();

    // Neutral fallback for an empty change series (unreachable after the two-price guard)
    if gains.is_empty() {
        return vec![Some(NEUTRAL_RSI); prices.len()];
    }
    if prices.len() <= period {
        return vec![None; prices.len()];
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let mut results = vec![None; period];
    let weight = (period - 1) as f64;

    for i in period..prices.len() {
        avg_gain = (avg_gain * weight + gains[i - 1]) / period as f64;
        avg_loss = (avg_loss * weight + losses[i - 1]) / period as f64;

        let rs = if avg_loss == 0.0 { ZERO_LOSS_RS } else { avg_gain / avg_loss };
        results.push(Some(100.0 - (100.0 / (1.0 + rs))));
    }
    results
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD)
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>> {
        rsi(prices, self.period)
    }
}
