// Engine main entry point: CSV price bars in, JSON prediction report out
use anyhow::Context;
use mxchines_engine::config::{load_model_configuration, EngineSettings};
use mxchines_engine::data::{bars_for_symbol, closing_prices, PriceBarCsvParser};
use mxchines_engine::indicators::indicator_panel;
use mxchines_engine::logging;
use mxchines_engine::predict;
use serde::Serialize;
use shared::models::{Indicator, PredictionResult};
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    symbol: String,
    last_close: f64,
    indicators: Vec<Indicator>,
    predictions: Vec<PredictionResult>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let mut settings = EngineSettings::from_env()?;
    logging::init_logging(settings.log_format);

    // A path on the command line wins over MXCHINES_DATA_FILE
    if let Some(path) = std::env::args().nth(1) {
        settings.data_file = Some(PathBuf::from(path));
    }
    let data_file = settings
        .data_file
        .clone()
        .context("No price data file given (argument or MXCHINES_DATA_FILE)")?;

    info!(symbol = %settings.symbol, path = %data_file.display(), "Starting prediction run");

    let model_config = load_model_configuration(settings.model_config_file.as_deref())?;
    let bars = PriceBarCsvParser::load_bars_from_csv(&data_file, &settings.symbol)?;
    let prices = closing_prices(bars_for_symbol(&bars, &settings.symbol));
    let last_close = *prices
        .last()
        .with_context(|| format!("No price bars for symbol '{}' in {}", settings.symbol, data_file.display()))?;

    let indicators = indicator_panel(&prices, &model_config.technical_indicators);
    let predictions = settings
        .horizons
        .iter()
        .map(|&horizon| predict(&prices, horizon, &model_config))
        .collect::<Result<Vec<_>, _>>()?;

    for prediction in &predictions {
        info!(
            horizon = %prediction.horizon,
            predicted_close = prediction.predicted_close,
            trend = ?prediction.trend,
            confidence = prediction.confidence,
            "Prediction ready"
        );
    }

    let report = Report {
        symbol: settings.symbol,
        last_close,
        indicators,
        predictions,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
