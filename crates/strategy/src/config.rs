use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// Thresholds for the order-block signal pipeline.
///
/// Every field is optional in the file. Example `config/strategy.toml`:
/// ```toml
/// min_pattern_strength = 0.35
/// rsi_period = 7
/// bullish_rsi_min = 60.0
///
/// [take_profit_range]
/// min = 0.01
/// max = 0.08
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Windows shorter than this never produce a signal.
    pub min_candles: usize,
    pub min_pattern_strength: f64,
    /// Maximum |entry - price| / price.
    pub max_entry_distance: f64,
    pub rsi_period: usize,
    /// Bullish signals need RSI at or above this.
    pub bullish_rsi_min: f64,
    /// Bearish signals need RSI at or below this.
    pub bearish_rsi_max: f64,
    pub atr_period: usize,
    pub stop_loss_atr: f64,
    pub take_profit_atr: f64,
    pub take_profit_range: Bounds,
    pub stop_loss_range: Bounds,
    pub risk_reward_range: Bounds,
}

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_candles: 20,
            min_pattern_strength: 0.30,
            max_entry_distance: 0.05,
            rsi_period: 7,
            bullish_rsi_min: 55.0,
            bearish_rsi_max: 45.0,
            atr_period: 14,
            stop_loss_atr: 1.5,
            take_profit_atr: 3.0,
            take_profit_range: Bounds::new(0.01, 0.10),
            stop_loss_range: Bounds::new(0.005, 0.05),
            risk_reward_range: Bounds::new(1.2, 3.5),
        }
    }
}

impl SignalConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read strategy config at '{path}': {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| {
            Error::Config(format!("Failed to parse strategy config at '{path}': {e}"))
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
