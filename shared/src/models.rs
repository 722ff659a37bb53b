use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One daily bar as delivered by the market-data retrieval layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

// A named series ready for charting. `None` marks warm-up positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}

/// MACD line, its signal line and the histogram, all aligned with the input prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdResult {
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PredictionHorizon {
    #[serde(rename = "24h")]
    Hours24,
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
}

impl PredictionHorizon {
    pub const ALL: [PredictionHorizon; 3] = [
        PredictionHorizon::Hours24,
        PredictionHorizon::Days7,
        PredictionHorizon::Days30,
    ];

    /// Number of daily bars the prediction is projected forward.
    pub fn days(self) -> u32 {
        match self {
            PredictionHorizon::Hours24 => 1,
            PredictionHorizon::Days7 => 7,
            PredictionHorizon::Days30 => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionHorizon::Hours24 => "24h",
            PredictionHorizon::Days7 => "7d",
            PredictionHorizon::Days30 => "30d",
        }
    }
}

impl fmt::Display for PredictionHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionHorizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "1d" => Ok(PredictionHorizon::Hours24),
            "7d" | "1w" => Ok(PredictionHorizon::Days7),
            "30d" | "1m" => Ok(PredictionHorizon::Days30),
            other => Err(format!("Unknown prediction horizon '{}'. Use 24h, 7d or 30d.", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Technical,
    Fundamental,
    Sentiment,
}

// Textual signals, one fixed list per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub technical: Vec<String>,
    pub fundamental: Vec<String>,
    pub sentiment: Vec<String>,
}

impl Signals {
    pub fn push(&mut self, category: SignalCategory, message: impl Into<String>) {
        self.list_mut(category).push(message.into());
    }

    pub fn get(&self, category: SignalCategory) -> &[String] {
        match category {
            SignalCategory::Technical => &self.technical,
            SignalCategory::Fundamental => &self.fundamental,
            SignalCategory::Sentiment => &self.sentiment,
        }
    }

    fn list_mut(&mut self, category: SignalCategory) -> &mut Vec<String> {
        match category {
            SignalCategory::Technical => &mut self.technical,
            SignalCategory::Fundamental => &mut self.fundamental,
            SignalCategory::Sentiment => &mut self.sentiment,
        }
    }
}

/// Independent evidence scores per category, each within [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub technical: f64,
    pub fundamental: f64,
    pub sentiment: f64,
}

impl CategoryScores {
    pub fn get(&self, category: SignalCategory) -> f64 {
        match category {
            SignalCategory::Technical => self.technical,
            SignalCategory::Fundamental => self.fundamental,
            SignalCategory::Sentiment => self.sentiment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_close: f64,
    pub confidence: f64,
    pub trend: Trend,
    pub horizon: PredictionHorizon,
    pub support_level: f64,
    pub resistance_level: f64,
    pub volatility: VolatilityLevel,
    pub signals: Signals,
    pub ai_confidence: CategoryScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for VolatilityThresholds {
    fn default() -> Self {
        VolatilityThresholds { low: 20.0, medium: 50.0, high: 80.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorToggles {
    pub sma: bool,
    pub ema: bool,
    pub rsi: bool,
    pub macd: bool,
}

impl IndicatorToggles {
    pub fn none() -> Self {
        IndicatorToggles { sma: false, ema: false, rsi: false, macd: false }
    }

    pub fn enabled_count(&self) -> usize {
        [self.sma, self.ema, self.rsi, self.macd].iter().filter(|on| **on).count()
    }
}

impl Default for IndicatorToggles {
    fn default() -> Self {
        IndicatorToggles { sma: true, ema: true, rsi: true, macd: true }
    }
}

/// Model settings owned by the configuration store. Passed in per call, never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfiguration {
    pub prediction_window: u32,
    pub confidence_threshold: f64,
    pub volatility_thresholds: VolatilityThresholds,
    pub technical_indicators: IndicatorToggles,
}

impl Default for ModelConfiguration {
    fn default() -> Self {
        ModelConfiguration {
            prediction_window: 30,
            confidence_threshold: 75.0,
            volatility_thresholds: VolatilityThresholds::default(),
            technical_indicators: IndicatorToggles::default(),
        }
    }
}
