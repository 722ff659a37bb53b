// Engine settings, loaded from environment variables (optionally via a .env file)
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::PredictionHorizon;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_FILE_VAR: &str = "MXCHINES_DATA_FILE";
pub const MODEL_CONFIG_VAR: &str = "MXCHINES_MODEL_CONFIG";
pub const SYMBOL_VAR: &str = "MXCHINES_SYMBOL";
pub const HORIZONS_VAR: &str = "MXCHINES_HORIZONS";
pub const LOG_FORMAT_VAR: &str = "MXCHINES_LOG_FORMAT";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(EngineError::ConfigError(format!(
                "Unknown log format '{}'. Use 'pretty' or 'json'.",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub data_file: Option<PathBuf>,
    pub model_config_file: Option<PathBuf>,
    pub symbol: String,
    pub horizons: Vec<PredictionHorizon>,
    pub log_format: LogFormat,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_file: None,
            model_config_file: None,
            symbol: "UNKNOWN".to_string(),
            horizons: PredictionHorizon::ALL.to_vec(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Unset or blank variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = EngineSettings::default();

        if let Some(path) = get(DATA_FILE_VAR) {
            settings.data_file = Some(PathBuf::from(path));
        }
        if let Some(path) = get(MODEL_CONFIG_VAR) {
            settings.model_config_file = Some(PathBuf::from(path));
        }
        if let Some(symbol) = get(SYMBOL_VAR) {
            settings.symbol = symbol.trim().to_uppercase();
        }
        if let Some(raw) = get(HORIZONS_VAR) {
            settings.horizons = parse_horizons(&raw)?;
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            settings.log_format = raw.parse()?;
        }
        Ok(settings)
    }
}

pub fn parse_horizons(raw: &str) -> Result<Vec<PredictionHorizon>, EngineError> {
    let mut horizons = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let horizon = part.parse::<PredictionHorizon>().map_err(EngineError::ConfigError)?;
        if !horizons.contains(&horizon) {
            horizons.push(horizon);
        }
    }
    if horizons.is_empty() {
        return Err(EngineError::ConfigError(format!("No prediction horizon in '{}'", raw)));
    }
    Ok(horizons)
}
