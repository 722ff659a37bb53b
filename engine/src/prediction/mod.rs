// Prediction synthesizer: price series + horizon + model configuration -> PredictionResult
pub mod levels;
pub mod scoring;

use crate::config::validate_model_configuration;
use crate::error::EngineError;
use crate::indicators::annualized_volatility;
use crate::indicators::volatility::{classify_annualized, TRADING_DAYS_PER_YEAR};
use shared::models::{
    CategoryScores, ModelConfiguration, PredictionHorizon, PredictionResult, SignalCategory, Signals, Trend,
    VolatilityLevel,
};
use shared::utils::mean;

pub use levels::{support_resistance, PriceLevels};
pub use scoring::{technical_readings, IndicatorReading};

/// Smallest projected change (as a fraction of price) that can move the trend off neutral.
pub const MATERIALITY_FLOOR: f64 = 0.001;
/// Support/resistance spread used when recent prices show no range.
pub const DEFAULT_SPREAD: f64 = 0.02;
/// Largest expected move over any horizon, as a fraction of the last price.
pub const MAX_HORIZON_MOVE: f64 = 1.0;

fn volatility_penalty(level: VolatilityLevel) -> f64 {
    match level {
        VolatilityLevel::Low => 1.0,
        VolatilityLevel::Medium => 0.85,
        VolatilityLevel::High => 0.7,
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Neutral below the materiality floor (raised with the confidence threshold), otherwise the sign of the change.
pub fn classify_trend(projected_change: f64, confidence_threshold: f64) -> Trend {
    let significance = MATERIALITY_FLOOR * (1.0 + confidence_threshold / 100.0);
    if projected_change.abs() < significance {
        Trend::Neutral
    } else if projected_change > 0.0 {
        Trend::Bullish
    } else {
        Trend::Bearish
    }
}

/// Builds one prediction for `horizon` from `prices` (ascending by time).
///
/// Fails with a configuration error for out-of-range settings and with
/// `InsufficientData` for an empty series. With no usable indicator the
/// prediction is the last price.
pub fn predict(
    prices: &[f64],
    horizon: PredictionHorizon,
    config: &ModelConfiguration,
) -> Result<PredictionResult, EngineError> {
    validate_model_configuration(config)?;

    let Some(&last) = prices.last() else {
        tracing::warn!(%horizon, "Prediction requested for an empty price series");
        return Err(EngineError::InsufficientData(
            "at least one price is required to anchor a prediction".to_string(),
        ));
    };
    if let Some((index, &value)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(EngineError::InvalidPrice { index, value });
    }

    let annualized = annualized_volatility(prices);
    let volatility = classify_annualized(annualized, &config.volatility_thresholds);

    let readings = technical_readings(prices, &config.technical_indicators);
    let scores: Vec<f64> = readings.iter().filter_map(|r| r.score).collect();
    let direction = mean(&scores).unwrap_or(0.0);

    // Expected move over the horizon, from daily return volatility
    let days = f64::from(horizon.days());
    let daily_volatility = annualized / TRADING_DAYS_PER_YEAR.sqrt() / 100.0;
    let horizon_move = (daily_volatility * days.sqrt()).min(MAX_HORIZON_MOVE);

    let projected_change = if scores.is_empty() {
        0.0
    } else {
        (direction * horizon_move).max(-1.0)
    };
    let predicted_close = if scores.is_empty() {
        last
    } else {
        last * (1.0 + projected_change)
    };
    let trend = classify_trend(projected_change, config.confidence_threshold);

    let window = config.prediction_window as usize;
    let levels = support_resistance(prices, window, DEFAULT_SPREAD.max(horizon_move))
        .ok_or_else(|| EngineError::InsufficientData("no prices for support/resistance".to_string()))?;

    let enabled = config.technical_indicators.enabled_count();
    let coverage = if enabled == 0 { 0.0 } else { scores.len() as f64 / enabled as f64 };
    let ai_confidence = CategoryScores {
        technical: clamp_percent(100.0 * direction.abs() * coverage),
        // No fundamental or sentiment sources feed this engine
        fundamental: 0.0,
        sentiment: 0.0,
    };
    let confidence = clamp_percent(ai_confidence.technical * volatility_penalty(volatility));

    let mut signals = Signals::default();
    for reading in &readings {
        signals.push(SignalCategory::Technical, reading.message.clone());
    }
    signals.push(
        SignalCategory::Technical,
        format!("Annualized volatility {:.2}% ({})", annualized, volatility),
    );
    if confidence < config.confidence_threshold {
        signals.push(
            SignalCategory::Technical,
            format!(
                "Confidence {:.1} is below the {:.1} threshold",
                confidence, config.confidence_threshold
            ),
        );
    }

    tracing::debug!(
        %horizon,
        last,
        direction,
        projected_change,
        annualized_volatility = annualized,
        indicators_used = scores.len(),
        indicators_enabled = enabled,
        confidence,
        "Synthesized prediction"
    );

    for (field, value) in [
        ("predicted close", predicted_close),
        ("support level", levels.support),
        ("resistance level", levels.resistance),
        ("confidence", confidence),
    ] {
        if !value.is_finite() {
            tracing::warn!(%horizon, last, field, value, "Prediction left the representable range");
            return Err(EngineError::NumericalError(format!("{} is {} for last price {}", field, value, last)));
        }
    }

    Ok(PredictionResult {
        predicted_close,
        confidence,
        trend,
        horizon,
        support_level: levels.support,
        resistance_level: levels.resistance,
        volatility,
        signals,
        ai_confidence,
    })
}
