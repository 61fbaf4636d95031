pub mod export;
pub mod outcome;
pub mod replay;
pub mod result;
pub mod runner;
pub mod summary;

pub use export::{csv_file_name, export_signals_csv, write_signals_csv};
pub use outcome::{evaluate_signal_outcome, future_candles, Evaluation};
pub use replay::{append_outcomes, replay, scan_historical_signals, ReplaySettings};
pub use result::{BacktestResult, BacktestStats, Detection, ScanRecord, TradeRecord, WindowFault};
pub use runner::{run_backtest, run_batch, BacktestSettings};
pub use summary::Summary;
