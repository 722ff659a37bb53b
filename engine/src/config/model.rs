// Model configuration checks and loading of the configuration store's JSON document
use crate::error::EngineError;
use shared::models::ModelConfiguration;
use std::fs;
use std::path::Path;

pub const MIN_PREDICTION_WINDOW: u32 = 1;
pub const MAX_PREDICTION_WINDOW: u32 = 365;

fn check_percentage(label: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(EngineError::ConfigError(format!("{} {} outside [0, 100]", label, value)));
    }
    Ok(())
}

/// Range checks plus `low <= medium <= high` ordering of the volatility thresholds.
/// Out-of-range values are reported, never clamped.
pub fn validate_model_configuration(config: &ModelConfiguration) -> Result<(), EngineError> {
    if !(MIN_PREDICTION_WINDOW..=MAX_PREDICTION_WINDOW).contains(&config.prediction_window) {
        return Err(EngineError::ConfigError(format!(
            "prediction window {} outside [{}, {}]",
            config.prediction_window, MIN_PREDICTION_WINDOW, MAX_PREDICTION_WINDOW
        )));
    }
    check_percentage("confidence threshold", config.confidence_threshold)?;

    let thresholds = &config.volatility_thresholds;
    check_percentage("low volatility threshold", thresholds.low)?;
    check_percentage("medium volatility threshold", thresholds.medium)?;
    check_percentage("high volatility threshold", thresholds.high)?;
    if thresholds.low > thresholds.medium || thresholds.medium > thresholds.high {
        return Err(EngineError::ConfigError(format!(
            "volatility thresholds must be ordered low <= medium <= high (got {} / {} / {})",
            thresholds.low, thresholds.medium, thresholds.high
        )));
    }
    Ok(())
}

pub fn parse_model_configuration(json: &str) -> Result<ModelConfiguration, EngineError> {
    let config: ModelConfiguration = serde_json::from_str(json)?;
    validate_model_configuration(&config)?;
    Ok(config)
}

/// Reads and validates a model configuration file. `None` yields the defaults.
pub fn load_model_configuration(path: Option<&Path>) -> Result<ModelConfiguration, EngineError> {
    let Some(path) = path else {
        tracing::info!("No model configuration file given, using defaults");
        return Ok(ModelConfiguration::default());
    };

    let contents = fs::read_to_string(path)?;
    let config = parse_model_configuration(&contents).map_err(|e| {
        tracing::error!(path = %path.display(), error_detail = ?e, "Invalid model configuration");
        e
    })?;
    tracing::info!(
        path = %path.display(),
        prediction_window = config.prediction_window,
        confidence_threshold = config.confidence_threshold,
        "Loaded model configuration"
    );
    Ok(config)
}
