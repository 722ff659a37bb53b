// Moving Average Convergence Divergence (MACD) indicator implementation
//
// line      = EMA(fast) - EMA(slow), both seeded at the first price
// signal    = EMA(signal) of the line
// histogram = line - signal
use super::ema::ema;
use serde_json::Value;
use shared::models::MacdResult;

pub struct Macd {
    name: String,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast_period, slow_period, signal_period),
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum number of prices before any output is produced.
    pub fn longest_period(&self) -> usize {
        self.fast_period.max(self.slow_period).max(self.signal_period)
    }

    pub fn parameters(&self) -> Value {
        serde_json::json!({
            "fast": self.fast_period,
            "slow": self.slow_period,
            "signal": self.signal_period,
        })
    }

    /// Fewer prices than the largest period yields an all-empty result; otherwise
    /// all three series have the input's length and no gaps.
    pub fn calculate(&self, prices: &[f64]) -> MacdResult {
        let longest = self.longest_period();
        let any_zero = self.fast_period == 0 || self.slow_period == 0 || self.signal_period == 0;
        if any_zero || prices.len() < longest {
            return MacdResult::default();
        }

        let fast_ema = ema(prices, self.fast_period);
        let slow_ema = ema(prices, self.slow_period);
        let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(fast, slow)| fast - slow).collect();
        let signal = ema(&line, self.signal_period);
        let histogram = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        MacdResult { line, signal, histogram }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

pub fn macd(prices: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdResult {
    Macd::new(fast_period, slow_period, signal_period).calculate(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_longest_period_gates_output() {
        assert_eq!(Macd::default().longest_period(), 26);
        let macd = Macd::new(3, 2, 5);
        assert_eq!(macd.longest_period(), 5);
        assert!(macd.calculate(&[1.0; 4]).is_empty());
        assert_eq!(macd.calculate(&[1.0; 5]).line.len(), 5);
    }

    #[test]
    fn test_macd_hand_computed_five_points() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = macd(&prices, 2, 3, 2);

        // fast k = 2/3: 1, 5/3, 23/9, 95/27, 365/81
        // slow k = 1/2: 1, 3/2, 9/4, 25/8, 65/16
        let fast = [1.0, 5.0 / 3.0, 23.0 / 9.0, 95.0 / 27.0, 365.0 / 81.0];
        let slow = [1.0, 1.5, 2.25, 3.125, 4.0625];

        assert_eq!(result.line.len(), 5);
        for i in 0..5 {
            assert_close(result.line[i], fast[i] - slow[i]);
        }

        // Line equals the difference of the helper EMAs exactly
        let fast_ema = ema(&prices, 2);
        let slow_ema = ema(&prices, 3);
        for i in 0..5 {
            assert_eq!(result.line[i], fast_ema[i] - slow_ema[i]);
        }

        // Signal seeded with line[0] = 0, then k = 2/3
        assert_eq!(result.signal[0], 0.0);
        assert_close(result.signal[1], result.line[1] * 2.0 / 3.0);
        for i in 0..5 {
            assert_eq!(result.histogram[i], result.line[i] - result.signal[i]);
        }
    }

    #[test]
    fn test_macd_default_periods_cover_whole_series() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let result = Macd::default().calculate(&prices);
        assert_eq!(result.line.len(), 40);
        assert_eq!(result.signal.len(), 40);
        assert_eq!(result.histogram.len(), 40);
        assert!(result.line.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let prices = vec![10.0; 25];
        let result = Macd::default().calculate(&prices);
        assert!(result.is_empty());
        assert!(result.signal.is_empty());
        assert!(result.histogram.is_empty());

        // The signal period counts toward the minimum length too
        assert!(macd(&[1.0, 2.0, 3.0], 2, 3, 4).is_empty());
    }

    #[test]
    fn test_macd_zero_period() {
        assert!(macd(&[1.0; 30], 0, 26, 9).is_empty());
    }

    #[test]
    fn test_macd_constant_series_is_flat() {
        let result = Macd::default().calculate(&[42.0; 30]);
        assert!(result.line.iter().all(|v| v.abs() < 1e-9));
        assert!(result.histogram.iter().all(|v| v.abs() < 1e-9));
    }
}
