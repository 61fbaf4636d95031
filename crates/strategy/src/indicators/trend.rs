use common::{Candle, SignalType};

use super::ema;

pub const TREND_FAST: usize = 34;
pub const TREND_SLOW: usize = 89;

/// Trend direction from EMA34 vs EMA89 over the most recent candles.
///
/// Bullish when EMA34 >= EMA89. With fewer than 89 candles this always
/// returns `Bearish`: short windows are treated as bearish by default.
pub fn determine_trend(candles: &[Candle]) -> SignalType {
    if candles.len() < TREND_SLOW {
        return SignalType::Bearish;
    }

    match (
        ema(&candles[..TREND_FAST], TREND_FAST),
        ema(&candles[..TREND_SLOW], TREND_SLOW),
    ) {
        (Some(fast), Some(slow)) if fast >= slow => SignalType::Bullish,
        _ => SignalType::Bearish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::fixtures::from_closes;

    #[test]
    fn short_history_defaults_to_bearish() {
        let closes: Vec<f64> = (0..88).map(|i| 100.0 + i as f64).collect();
        assert_eq!(determine_trend(&from_closes(&closes)), SignalType::Bearish);
    }

    #[test]
    fn rising_closes_are_bullish() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + i as f64).collect();
        assert_eq!(determine_trend(&from_closes(&closes)), SignalType::Bullish);
    }

    #[test]
    fn falling_closes_are_bearish() {
        let closes: Vec<f64> = (0..120).map(|i| 300.0 - i as f64).collect();
        assert_eq!(determine_trend(&from_closes(&closes)), SignalType::Bearish);
    }

    #[test]
    fn flat_closes_are_bullish() {
        assert_eq!(determine_trend(&from_closes(&[50.0; 89])), SignalType::Bullish);
    }
}
