//! Directional readings from the enabled technical indicators.
//!
//! Every reading carries a score in [-1, 1] (positive is bullish) or `None` when
//! the series is too short for that indicator, plus a human-readable signal.

use crate::indicators::{ema, rsi, sma, Macd, DEFAULT_EMA_PERIOD, DEFAULT_RSI_PERIOD, SHORT_SMA_PERIOD};
use shared::models::IndicatorToggles;

/// Deviation from a moving average that earns a full score.
pub const FULL_SCALE_DEVIATION: f64 = 0.05;
/// MACD histogram, relative to price, that earns a full score.
pub const FULL_SCALE_HISTOGRAM: f64 = 0.01;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorReading {
    pub indicator: String,
    pub score: Option<f64>,
    pub message: String,
}

impl IndicatorReading {
    fn insufficient(indicator: String, required: usize, available: usize) -> Self {
        let message = format!("{}: insufficient data ({} of {} prices)", indicator, available, required);
        IndicatorReading { indicator, score: None, message }
    }

    // Sums over extreme prices can overflow; such a reading carries no score
    fn out_of_range(indicator: String) -> Self {
        let message = format!("{}: value out of numeric range", indicator);
        IndicatorReading { indicator, score: None, message }
    }

    fn finite(self) -> Self {
        match self.score {
            Some(score) if !score.is_finite() => Self::out_of_range(self.indicator),
            _ => self,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

fn average_reading(indicator: String, last: f64, average: f64) -> IndicatorReading {
    if !average.is_finite() {
        return IndicatorReading::out_of_range(indicator);
    }
    if average == 0.0 {
        let message = format!("{}: undefined deviation from a zero average", indicator);
        return IndicatorReading { indicator, score: None, message };
    }
    let deviation = (last - average) / average.abs();
    if !deviation.is_finite() {
        return IndicatorReading::out_of_range(indicator);
    }
    let side = if deviation >= 0.0 { "above" } else { "below" };
    let message = format!(
        "Price {:.2}% {} {} ({:.2})",
        deviation.abs() * 100.0,
        side,
        indicator,
        average
    );
    IndicatorReading { indicator, score: Some(clamp_unit(deviation / FULL_SCALE_DEVIATION)), message }
}

pub fn sma_reading(prices: &[f64], last: f64) -> IndicatorReading {
    let indicator = format!("SMA({})", SHORT_SMA_PERIOD);
    match sma(prices, SHORT_SMA_PERIOD).last().copied().flatten() {
        Some(average) => average_reading(indicator, last, average),
        None => IndicatorReading::insufficient(indicator, SHORT_SMA_PERIOD, prices.len()),
    }
}

// The EMA has no warm-up gap, but it only says something once it spans a full period
pub fn ema_reading(prices: &[f64], last: f64) -> IndicatorReading {
    let indicator = format!("EMA({})", DEFAULT_EMA_PERIOD);
    if prices.len() < DEFAULT_EMA_PERIOD {
        return IndicatorReading::insufficient(indicator, DEFAULT_EMA_PERIOD, prices.len());
    }
    match ema(prices, DEFAULT_EMA_PERIOD).last() {
        Some(&average) => average_reading(indicator, last, average),
        None => IndicatorReading::insufficient(indicator, DEFAULT_EMA_PERIOD, prices.len()),
    }
}

/// Mean reversion: overbought readings lean bearish, oversold readings lean bullish.
pub fn rsi_score(value: f64) -> f64 {
    if value >= RSI_OVERBOUGHT {
        -(value - RSI_OVERBOUGHT) / (100.0 - RSI_OVERBOUGHT)
    } else if value <= RSI_OVERSOLD {
        (RSI_OVERSOLD - value) / RSI_OVERSOLD
    } else {
        0.0
    }
}

pub fn rsi_reading(prices: &[f64]) -> IndicatorReading {
    let indicator = format!("RSI({})", DEFAULT_RSI_PERIOD);
    let Some(value) = rsi(prices, DEFAULT_RSI_PERIOD).last().copied().flatten() else {
        return IndicatorReading::insufficient(indicator, DEFAULT_RSI_PERIOD + 1, prices.len());
    };
    if !value.is_finite() {
        return IndicatorReading::out_of_range(indicator);
    }

    let zone = if value >= RSI_OVERBOUGHT {
        "overbought"
    } else if value <= RSI_OVERSOLD {
        "oversold"
    } else {
        "neutral"
    };
    let message = format!("{} at {:.2}: {}", indicator, value, zone);
    IndicatorReading { indicator, score: Some(rsi_score(value)), message }
}

pub fn macd_reading(prices: &[f64], last: f64) -> IndicatorReading {
    let macd = Macd::default();
    let indicator = macd.name().to_string();
    let result = macd.calculate(prices);
    let Some(&histogram) = result.histogram.last() else {
        return IndicatorReading::insufficient(indicator, macd.longest_period(), prices.len());
    };
    if !histogram.is_finite() {
        return IndicatorReading::out_of_range(indicator);
    }

    let score = if last == 0.0 {
        0.0
    } else {
        clamp_unit(histogram / (last.abs() * FULL_SCALE_HISTOGRAM))
    };
    let momentum = if histogram > 0.0 {
        "bullish momentum"
    } else if histogram < 0.0 {
        "bearish momentum"
    } else {
        "no momentum"
    };
    let message = format!("{} histogram {:+.4}: {}", indicator, histogram, momentum);
    IndicatorReading { indicator, score: Some(score), message }
}

/// Readings for the enabled indicators only, in a fixed order.
pub fn technical_readings(prices: &[f64], toggles: &IndicatorToggles) -> Vec<IndicatorReading> {
    let Some(&last) = prices.last() else {
        return Vec::new();
    };

    let mut readings = Vec::with_capacity(toggles.enabled_count());
    if toggles.sma {
        readings.push(sma_reading(prices, last));
    }
    if toggles.ema {
        readings.push(ema_reading(prices, last));
    }
    if toggles.rsi {
        readings.push(rsi_reading(prices));
    }
    if toggles.macd {
        readings.push(macd_reading(prices, last));
    }
    readings.into_iter().map(IndicatorReading::finite).collect()
}
