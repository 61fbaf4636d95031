//! Multi-factor quality score for a synthesized signal.
//!
//! Five components, each normalised to [0, 1], are blended with fixed
//! weights, a small bonus is added for favourable risk/reward and strong
//! momentum, and the result is scaled to an integer in [0, 100] with a
//! letter grade. Any failure inside the computation degrades to score 0 /
//! grade F instead of aborting the caller.

use tracing::warn;

use common::{Candle, Error, Grade, HealthComponents, HealthScore, Result, SignalType};

const TREND_WEIGHT: f64 = 0.15;
const VOLUME_WEIGHT: f64 = 0.15;
const PATTERN_WEIGHT: f64 = 0.20;
const RISK_WEIGHT: f64 = 0.20;
const MOMENTUM_WEIGHT: f64 = 0.30;

const TREND_LOOKBACK: usize = 20;
const VOLUME_CONSISTENCY_LOOKBACK: usize = 5;
const VOLUME_CONSISTENCY_FLOOR: f64 = 0.7;
const MOMENTUM_LOOKBACK: usize = 3;

const BONUS_STEP: f64 = 0.05;

/// Inputs carried over from signal synthesis.
#[derive(Debug, Clone, Copy)]
pub struct HealthParams {
    pub signal_type: SignalType,
    pub pattern_strength: f64,
    pub avg_volume: Option<f64>,
    pub risk_reward_ratio: f64,
}

/// Score a signal. Never fails: internal faults yield [`HealthScore::failed`].
pub fn calculate_signal_health(
    candles: &[Candle],
    current: &Candle,
    params: &HealthParams,
) -> HealthScore {
    match score_components(candles, current, params) {
        Ok(health) => health,
        Err(e) => {
            warn!(error = %e, "Health scoring failed, grading signal F");
            HealthScore::failed()
        }
    }
}

fn score_components(
    candles: &[Candle],
    current: &Candle,
    params: &HealthParams,
) -> Result<HealthScore> {
    if candles.len() < MOMENTUM_LOOKBACK {
        return Err(Error::Numeric(format!(
            "health scoring needs {MOMENTUM_LOOKBACK} candles, got {}",
            candles.len()
        )));
    }

    let mut components = HealthComponents {
        trend: trend_strength(candles),
        volume: volume_score(candles, current, params.avg_volume),
        pattern: params.pattern_strength,
        risk: risk_score(params.risk_reward_ratio),
        momentum: momentum_score(candles, params.signal_type),
        bonus: 0.0,
    };

    let values = [
        ("trend", components.trend),
        ("volume", components.volume),
        ("pattern", components.pattern),
        ("risk", components.risk),
        ("momentum", components.momentum),
    ];
    if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
        return Err(Error::Numeric(format!("{name} component is {value}")));
    }

    let base = components.trend * TREND_WEIGHT
        + components.volume * VOLUME_WEIGHT
        + components.pattern * PATTERN_WEIGHT
        + components.risk * RISK_WEIGHT
        + components.momentum * MOMENTUM_WEIGHT;

    if params.risk_reward_ratio >= 2.0 {
        components.bonus += BONUS_STEP;
    }
    if components.momentum >= 0.5 {
        components.bonus += BONUS_STEP;
    }

    let total = (base + components.bonus).min(1.0).max(0.0);
    let score = (total * 100.0).round() as u8;

    Ok(HealthScore {
        score,
        grade: Grade::from_score(score),
        components,
    })
}

/// Fraction of up-closes among consecutive pairs of the 20 most recent candles.
pub fn trend_strength(candles: &[Candle]) -> f64 {
    let recent = &candles[..candles.len().min(TREND_LOOKBACK)];
    if recent.len() < 2 {
        return 0.0;
    }
    let up = recent
        .windows(2)
        .filter(|pair| pair[0].close > pair[1].close)
        .count();
    up as f64 / (recent.len() - 1) as f64
}

/// Current volume against the run average, with a consistency multiplier.
pub fn volume_score(candles: &[Candle], current: &Candle, avg_volume: Option<f64>) -> f64 {
    let Some(avg_volume) = avg_volume else {
        return 0.5;
    };

    let ratio = (current.volume / avg_volume).min(2.0) / 2.0;
    let consistent = candles
        .iter()
        .take(VOLUME_CONSISTENCY_LOOKBACK)
        .all(|c| c.volume >= avg_volume * VOLUME_CONSISTENCY_FLOOR);

    let scaled = if consistent { ratio * 1.2 } else { ratio * 0.8 };
    scaled.min(1.0)
}

/// Step function of the risk/reward ratio.
pub fn risk_score(risk_reward_ratio: f64) -> f64 {
    let rr = risk_reward_ratio;
    if (2.5..=4.0).contains(&rr) {
        1.0
    } else if (2.0..2.5).contains(&rr) {
        0.8
    } else if rr > 4.0 && rr <= 5.0 {
        0.7
    } else {
        0.5
    }
}

/// Average relative change over the 3 most recent closes, confirmed against
/// the signal direction. Disagreeing momentum is halved.
pub fn momentum_score(candles: &[Candle], signal_type: SignalType) -> f64 {
    let recent = &candles[..candles.len().min(MOMENTUM_LOOKBACK)];
    if recent.len() < 2 {
        return 0.0;
    }

    let momentum = recent
        .windows(2)
        .map(|pair| (pair[0].close - pair[1].close) / pair[1].close)
        .sum::<f64>()
        / (recent.len() - 1) as f64;

    let normalized = momentum.abs().min(1.0);
    let confirmed = match signal_type {
        SignalType::Bullish => momentum > 0.0,
        SignalType::Bearish => momentum < 0.0,
    };

    if confirmed {
        normalized
    } else {
        normalized * 0.5
    }
}
