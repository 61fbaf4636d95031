pub mod analyzer;
pub mod config;
pub mod health;
pub mod indicators;
pub mod order_block;

pub use analyzer::OrderBlockStrategy;
pub use config::{Bounds, SignalConfig};
pub use health::{calculate_signal_health, HealthParams};
pub use order_block::find_nearest_order_block;

use common::{Candle, Levels, RejectionReason, Result, Signal};

/// Result of running a strategy over one window.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Accepted(Signal),
    Rejected(RejectionReason),
}

impl Analysis {
    pub fn into_signal(self) -> Option<Signal> {
        match self {
            Analysis::Accepted(signal) => Some(signal),
            Analysis::Rejected(_) => None,
        }
    }
}

/// All signal synthesizers must satisfy this trait.
pub trait Strategy: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Evaluate one newest-first window and optionally emit a signal.
    ///
    /// Returns `Ok(Analysis::Rejected(..))` when no signal is warranted and
    /// `Err` only for faults (malformed candles, non-finite arithmetic).
    fn analyze(
        &self,
        window: &[Candle],
        levels: &Levels,
        realtime_price: Option<f64>,
    ) -> Result<Analysis>;
}
