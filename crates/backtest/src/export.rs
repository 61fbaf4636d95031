use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use common::{Error, Result};

use crate::result::BacktestResult;

const HEADER: [&str; 16] = [
    "symbol",
    "timestamp",
    "type",
    "entry",
    "stopLoss",
    "takeProfit",
    "currentPrice",
    "score",
    "grade",
    "outcome",
    "tradeDurationHours",
    "riskRewardRatio",
    "winRate",
    "totalTrades",
    "totalWins",
    "totalLosses",
];

/// `BTC-USDT` + `4h` -> `BTCUSDT_4h_signals.csv`
pub fn csv_file_name(symbol: &str, interval: &str) -> String {
    format!("{}_{interval}_signals.csv", symbol.replace('-', ""))
}

/// Render every trade of `result` as CSV, one row per signal.
///
/// Run-level stats are repeated on each row. Fault records are left out.
pub fn export_signals_csv(result: &BacktestResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER).map_err(export_error)?;

    let stats = &result.stats;
    for t in result.trades() {
        let s = &t.signal;
        wtr.write_record([
            &t.symbol,
            &iso_millis(t.timestamp),
            &s.signal_type.to_string(),
            &format!("{:.8}", s.entry),
            &format!("{:.8}", s.stop_loss),
            &format!("{:.8}", s.take_profit),
            &format!("{:.8}", s.current_price),
            &s.health.score.to_string(),
            &s.health.grade.to_string(),
            &t.outcome.to_string(),
            &t.trade_duration_hours
                .map(|h| format!("{h:.2}"))
                .unwrap_or_default(),
            &format!("{:.2}", s.risk_reward_ratio),
            &format!("{:.2}", stats.win_rate),
            &stats.total.to_string(),
            &stats.wins.to_string(),
            &stats.losses.to_string(),
        ])
        .map_err(export_error)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| Error::Export(format!("failed to flush CSV writer: {e}")))?;
    String::from_utf8(data).map_err(|e| Error::Export(format!("CSV output is not valid UTF-8: {e}")))
}

/// Write the CSV for `result` into `dir`. Results without trades are not
/// written and return `Ok(None)`.
pub fn write_signals_csv(result: &BacktestResult, dir: &Path) -> Result<Option<PathBuf>> {
    if !result.has_trades() {
        return Ok(None);
    }

    let body = export_signals_csv(result)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(csv_file_name(&result.symbol, &result.interval));
    std::fs::write(&path, body)?;

    info!(
        symbol = %result.symbol,
        rows = result.stats.total,
        path = %path.display(),
        "Signals exported"
    );
    Ok(Some(path))
}

fn iso_millis(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp.to_string())
}

fn export_error(e: csv::Error) -> Error {
    Error::Export(e.to_string())
}
