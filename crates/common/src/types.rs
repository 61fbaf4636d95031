use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One OHLCV bar. Timestamps are the bar open time in milliseconds since epoch.
///
/// Every slice of candles handled by the core is ordered newest-first:
/// index 0 is the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Check the OHLCV invariant: finite fields, positive open,
    /// `high >= max(open, close, low)` and `low <= min(open, close, high)`.
    pub fn validate(&self) -> Result<()> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(self.invalid("non-finite field"));
        }
        if self.open <= 0.0 {
            return Err(self.invalid("open must be positive"));
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err(self.invalid("high below body or low"));
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err(self.invalid("low above body or high"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::InvalidCandle {
            timestamp: self.timestamp,
            reason: reason.to_string(),
        }
    }
}

/// Aggregates computed once per backtest run and shared read-only by every window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub avg_volume: f64,
}

impl Levels {
    pub fn from_candles(candles: &[Candle]) -> Self {
        let avg_volume = if candles.is_empty() {
            0.0
        } else {
            candles.iter().map(|c| c.volume).sum::<f64>() / candles.len() as f64
        };
        Self { avg_volume }
    }

    /// The average volume, if it is usable as a divisor.
    pub fn avg_volume(&self) -> Option<f64> {
        (self.avg_volume.is_finite() && self.avg_volume > 0.0).then_some(self.avg_volume)
    }
}

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Bullish,
    Bearish,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Bullish => write!(f, "bullish"),
            SignalType::Bearish => write!(f, "bearish"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub signal_type: SignalType,
    /// Candle strength of the most recent bar, in [0, 1].
    pub strength: f64,
}

/// Letter grade attached to a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Per-factor contributions to a health score, each in [0, 1] except `bonus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthComponents {
    pub trend: f64,
    pub volume: f64,
    pub pattern: f64,
    pub risk: f64,
    pub momentum: f64,
    pub bonus: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Integer score in [0, 100].
    pub score: u8,
    pub grade: Grade,
    pub components: HealthComponents,
}

impl HealthScore {
    /// Score assigned when the health computation cannot complete.
    pub fn failed() -> Self {
        Self {
            score: 0,
            grade: Grade::F,
            components: HealthComponents::default(),
        }
    }
}

/// A synthesized trade candidate. Only produced once every filter has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub strength: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub current_price: f64,
    pub risk_reward_ratio: f64,
    /// Index of the order-block candle inside the analysed window.
    pub order_block: usize,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub health: HealthScore,
}

impl Signal {
    pub fn is_long(&self) -> bool {
        self.signal_type == SignalType::Bullish
    }

    /// Take-profit distance as a fraction of entry.
    pub fn take_profit_distance(&self) -> f64 {
        (self.take_profit - self.entry).abs() / self.entry
    }

    /// Stop-loss distance as a fraction of entry.
    pub fn stop_loss_distance(&self) -> f64 {
        (self.stop_loss - self.entry).abs() / self.entry
    }
}

/// How an accepted signal played out against subsequent candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Open,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Open => write!(f, "open"),
        }
    }
}

/// Why a window produced no signal. Rejections are normal outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    InsufficientData { candles: usize },
    MissingAverageVolume,
    NoOrderBlock,
    WeakPattern { strength: f64 },
    EntryTooFar { distance: f64 },
    MomentumFilter { rsi: f64 },
    TakeProfitDistance { ratio: f64 },
    StopLossDistance { ratio: f64 },
    RiskReward { ratio: f64 },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::InsufficientData { candles } => {
                write!(f, "insufficient data ({candles} candles)")
            }
            RejectionReason::MissingAverageVolume => write!(f, "average volume unavailable"),
            RejectionReason::NoOrderBlock => write!(f, "no qualifying order block"),
            RejectionReason::WeakPattern { strength } => {
                write!(f, "pattern strength {strength:.3} too weak")
            }
            RejectionReason::EntryTooFar { distance } => {
                write!(f, "entry {:.2}% away from price", distance * 100.0)
            }
            RejectionReason::MomentumFilter { rsi } => write!(f, "RSI {rsi:.1} against direction"),
            RejectionReason::TakeProfitDistance { ratio } => {
                write!(f, "take-profit distance {ratio:.4} out of range")
            }
            RejectionReason::StopLossDistance { ratio } => {
                write!(f, "stop-loss distance {ratio:.4} out of range")
            }
            RejectionReason::RiskReward { ratio } => write!(f, "risk/reward {ratio:.2} out of range"),
        }
    }
}
