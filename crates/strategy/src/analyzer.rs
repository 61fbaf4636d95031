use tracing::debug;

use common::{Candle, Error, Levels, Pattern, RejectionReason, Result, Signal, SignalType};

use crate::config::SignalConfig;
use crate::health::{calculate_signal_health, HealthParams};
use crate::indicators::{
    atr, candle_strength, determine_trend, nearest_resistance, nearest_support, rsi,
};
use crate::order_block::find_nearest_order_block;
use crate::{Analysis, Strategy};

/// Order-block signal synthesizer.
///
/// Runs the filter cascade over one window and emits at most one signal:
/// trend → order block → candle strength → entry distance → RSI gate →
/// ATR stop/target → distance bounds → risk/reward → health score.
#[derive(Debug, Clone, Default)]
pub struct OrderBlockStrategy {
    config: SignalConfig,
}

impl OrderBlockStrategy {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Smallest window the cascade can evaluate.
    pub fn required_candles(&self) -> usize {
        self.config
            .min_candles
            .max(self.config.rsi_period + 1)
            .max(self.config.atr_period + 1)
            .max(2)
    }

    /// Analyse a newest-first `window`. `realtime_price` defaults to the
    /// most recent close.
    ///
    /// Filter failures come back as `Ok(Analysis::Rejected(..))`. `Err` is
    /// reserved for malformed candles and non-finite intermediate values.
    pub fn analyze_order_blocks(
        &self,
        window: &[Candle],
        levels: &Levels,
        realtime_price: Option<f64>,
    ) -> Result<Analysis> {
        let cfg = &self.config;

        if window.len() < self.required_candles() {
            return Ok(Analysis::Rejected(RejectionReason::InsufficientData {
                candles: window.len(),
            }));
        }
        let Some(avg_volume) = levels.avg_volume() else {
            return Ok(Analysis::Rejected(RejectionReason::MissingAverageVolume));
        };
        for candle in window {
            candle.validate()?;
        }

        let current = &window[0];
        let price = realtime_price.unwrap_or(current.close);
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::Numeric(format!("realtime price {price} is not usable")));
        }

        let signal_type = determine_trend(window);

        let Some(block_index) = find_nearest_order_block(window, current) else {
            return Ok(Analysis::Rejected(RejectionReason::NoOrderBlock));
        };
        let order_block = &window[block_index];

        let pattern = Pattern {
            signal_type,
            strength: candle_strength(current, avg_volume),
        };
        if pattern.strength < cfg.min_pattern_strength {
            return Ok(Analysis::Rejected(RejectionReason::WeakPattern {
                strength: pattern.strength,
            }));
        }

        let entry = match signal_type {
            SignalType::Bullish => order_block.low.max(price),
            SignalType::Bearish => order_block.high.min(price),
        };
        let entry_distance = (entry - price).abs() / price;
        if entry_distance > cfg.max_entry_distance {
            return Ok(Analysis::Rejected(RejectionReason::EntryTooFar {
                distance: entry_distance,
            }));
        }

        let rsi = finite(rsi(window, cfg.rsi_period), "RSI")?;
        let momentum_confirmed = match signal_type {
            SignalType::Bullish => rsi >= cfg.bullish_rsi_min,
            SignalType::Bearish => rsi <= cfg.bearish_rsi_max,
        };
        if !momentum_confirmed {
            return Ok(Analysis::Rejected(RejectionReason::MomentumFilter { rsi }));
        }

        let atr = finite(atr(window, cfg.atr_period), "ATR")?;
        let (stop_loss, take_profit) = match signal_type {
            SignalType::Bearish => (
                entry + atr * cfg.stop_loss_atr,
                entry - atr * cfg.take_profit_atr,
            ),
            SignalType::Bullish => (
                entry - atr * cfg.stop_loss_atr,
                entry + atr * cfg.take_profit_atr,
            ),
        };

        let tp_distance = (take_profit - entry).abs() / entry;
        let sl_distance = (stop_loss - entry).abs() / entry;
        if !cfg.take_profit_range.contains(tp_distance) {
            return Ok(Analysis::Rejected(RejectionReason::TakeProfitDistance {
                ratio: tp_distance,
            }));
        }
        if !cfg.stop_loss_range.contains(sl_distance) {
            return Ok(Analysis::Rejected(RejectionReason::StopLossDistance {
                ratio: sl_distance,
            }));
        }

        let risk_reward_ratio = tp_distance / sl_distance;
        if !cfg.risk_reward_range.contains(risk_reward_ratio) {
            return Ok(Analysis::Rejected(RejectionReason::RiskReward {
                ratio: risk_reward_ratio,
            }));
        }

        let health = calculate_signal_health(
            window,
            current,
            &HealthParams {
                signal_type,
                pattern_strength: pattern.strength,
                avg_volume: Some(avg_volume),
                risk_reward_ratio,
            },
        );

        debug!(
            signal_type = %signal_type,
            entry,
            stop_loss,
            take_profit,
            score = health.score,
            "Order-block signal accepted"
        );

        Ok(Analysis::Accepted(Signal {
            signal_type,
            strength: pattern.strength,
            entry,
            stop_loss,
            take_profit,
            current_price: price,
            risk_reward_ratio,
            order_block: block_index,
            support: nearest_support(window, price),
            resistance: nearest_resistance(window, price),
            health,
        }))
    }
}

impl Strategy for OrderBlockStrategy {
    fn name(&self) -> &str {
        "order-block"
    }

    fn analyze(
        &self,
        window: &[Candle],
        levels: &Levels,
        realtime_price: Option<f64>,
    ) -> Result<Analysis> {
        self.analyze_order_blocks(window, levels, realtime_price)
    }
}

fn finite(value: Option<f64>, name: &str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(Error::Numeric(format!("{name} is {v}"))),
        None => Err(Error::Numeric(format!("{name} needs more candles"))),
    }
}
