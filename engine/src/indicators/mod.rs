// Technical indicators module
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use ema::{ema, Ema};
pub use macd::{macd, Macd};
pub use rsi::{rsi, Rsi, DEFAULT_RSI_PERIOD};
pub use sma::{sma, Sma};
pub use volatility::{annualized_volatility, classify_volatility};

use crate::error::EngineError;
use serde_json::Value;
use shared::models::{Indicator, IndicatorToggles};

pub const SHORT_SMA_PERIOD: usize = 20;
pub const LONG_SMA_PERIOD: usize = 50;
pub const DEFAULT_EMA_PERIOD: usize = 20;

// Common trait for all single-series indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, prices: &[f64]) -> Vec<Option<f64>>; // None marks warm-up positions
}

/// Builds a single-series indicator from its name and JSON parameters (`{"period": N}`).
pub fn build_calculator(kind: &str, params: &Value) -> Result<Box<dyn IndicatorCalculator>, EngineError> {
    let period_or = |default: usize| -> Result<usize, EngineError> {
        let period = params.get("period").and_then(|v| v.as_u64()).map_or(default, |p| p as usize);
        if period == 0 {
            return Err(EngineError::IndicatorError("Indicator period cannot be 0".to_string()));
        }
        Ok(period)
    };

    let calculator: Box<dyn IndicatorCalculator> = match kind.to_lowercase().as_str() {
        "sma" => Box::new(Sma::new(period_or(SHORT_SMA_PERIOD)?)),
        "ema" => Box::new(Ema::new(period_or(DEFAULT_EMA_PERIOD)?)),
        "rsi" => Box::new(Rsi::new(period_or(DEFAULT_RSI_PERIOD)?)),
        _ => {
            tracing::error!(indicator_type = %kind, "Unknown indicator type requested");
            return Err(EngineError::IndicatorError(format!("Unknown indicator type: {}", kind)));
        }
    };
    Ok(calculator)
}

pub fn named_series(calculator: &dyn IndicatorCalculator, prices: &[f64]) -> Indicator {
    Indicator {
        name: calculator.name().to_string(),
        parameters: calculator.parameters(),
        values: calculator.calculate(prices),
    }
}

/// Raw series for the enabled indicators, in chart order. Disabled indicators are omitted.
pub fn indicator_panel(prices: &[f64], toggles: &IndicatorToggles) -> Vec<Indicator> {
    let mut calculators: Vec<Box<dyn IndicatorCalculator>> = Vec::new();
    if toggles.sma {
        calculators.push(Box::new(Sma::new(SHORT_SMA_PERIOD)));
        calculators.push(Box::new(Sma::new(LONG_SMA_PERIOD)));
    }
    if toggles.ema {
        calculators.push(Box::new(Ema::new(DEFAULT_EMA_PERIOD)));
    }
    if toggles.rsi {
        calculators.push(Box::new(Rsi::default()));
    }

    let mut panel: Vec<Indicator> = calculators
        .iter()
        .map(|calculator| named_series(calculator.as_ref(), prices))
        .collect();

    if toggles.macd {
        let macd = Macd::default();
        let result = macd.calculate(prices);
        let parts = [("line", result.line), ("signal", result.signal), ("histogram", result.histogram)];
        for (part, values) in parts {
            panel.push(Indicator {
                name: format!("{} {}", macd.name(), part),
                parameters: macd.parameters(),
                values: values.into_iter().map(Some).collect(),
            });
        }
    }

    tracing::trace!(count = panel.len(), prices = prices.len(), "Built indicator panel");
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_calculator_by_name() {
        let calculator = build_calculator("SMA", &serde_json::json!({ "period": 5 })).unwrap();
        assert_eq!(calculator.name(), "SMA(5)");
        assert_eq!(calculator.parameters()["period"], 5);

        let calculator = build_calculator("rsi", &Value::Null).unwrap();
        assert_eq!(calculator.name(), "RSI(14)");
    }

    #[test]
    fn test_build_calculator_rejects_bad_input() {
        let err = build_calculator("sma", &serde_json::json!({ "period": 0 })).err().unwrap();
        assert!(err.to_string().contains("period cannot be 0"));

        let err = build_calculator("bollinger", &Value::Null).err().unwrap();
        assert!(err.to_string().contains("Unknown indicator type"));
    }

    #[test]
    fn test_panel_respects_toggles() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();

        let all = indicator_panel(&prices, &IndicatorToggles::default());
        let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SMA(20)",
                "SMA(50)",
                "EMA(20)",
                "RSI(14)",
                "MACD(12,26,9) line",
                "MACD(12,26,9) signal",
                "MACD(12,26,9) histogram",
            ]
        );
        assert!(all.iter().all(|i| i.values.len() == prices.len()));

        let only_rsi = IndicatorToggles { rsi: true, ..IndicatorToggles::none() };
        let panel = indicator_panel(&prices, &only_rsi);
        assert_eq!(panel.len(), 1);
        assert_eq!(panel[0].name, "RSI(14)");

        assert!(indicator_panel(&prices, &IndicatorToggles::none()).is_empty());
    }

    #[test]
    fn test_panel_with_short_series_keeps_empty_macd() {
        let prices = [1.0, 2.0, 3.0];
        let panel = indicator_panel(&prices, &IndicatorToggles { macd: true, ..IndicatorToggles::none() });
        assert_eq!(panel.len(), 3);
        assert!(panel.iter().all(|i| i.values.is_empty()));
    }
}
