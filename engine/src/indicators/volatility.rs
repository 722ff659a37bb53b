// Volatility classification from annualized root-mean-square returns
use shared::models::{VolatilityLevel, VolatilityThresholds};
use shared::utils::root_mean_square;

/// Daily bars per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple returns between consecutive prices. Pairs whose return is not
/// finite (zero previous price, or an overflowing difference) are skipped.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .filter(|r| r.is_finite())
        .collect()
}

/// Root mean square of simple returns (not centred on their mean), annualized
/// by √252, as a percentage. A steady trend therefore still reads as volatile.
///
/// A series without any return (fewer than two prices) has zero volatility.
/// The result is always finite: it saturates at `f64::MAX`.
pub fn annualized_volatility(prices: &[f64]) -> f64 {
    let returns = simple_returns(prices);
    let daily = root_mean_square(&returns).unwrap_or(0.0);
    (daily * TRADING_DAYS_PER_YEAR.sqrt() * 100.0).min(f64::MAX)
}

/// Threshold ordering is not checked here; the synthesizer validates it.
pub fn classify_volatility(prices: &[f64], thresholds: &VolatilityThresholds) -> VolatilityLevel {
    classify_annualized(annualized_volatility(prices), thresholds)
}

pub fn classify_annualized(annualized: f64, thresholds: &VolatilityThresholds) -> VolatilityLevel {
    if annualized <= thresholds.low {
        VolatilityLevel::Low
    } else if annualized <= thresholds.medium {
        VolatilityLevel::Medium
    } else {
        VolatilityLevel::High
    }
}
