//! Pure indicator functions over newest-first candle slices.
//!
//! Callers slice the window and nothing here allocates. Functions that need
//! a minimum history return `None` below it instead of producing a silently
//! wrong value.

pub mod atr;
pub mod candle;
pub mod ema;
pub mod levels;
pub mod rsi;
pub mod trend;

pub use atr::atr;
pub use candle::candle_strength;
pub use ema::ema;
pub use levels::{nearest_resistance, nearest_support};
pub use rsi::rsi;
pub use trend::{determine_trend, TREND_FAST, TREND_SLOW};
