use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use backtest::{run_batch, write_signals_csv, BacktestSettings, Summary};
use common::Config;
use engine::BinanceClient;
use strategy::{OrderBlockStrategy, SignalConfig, Strategy};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(
        symbols = %cfg.symbols.join(", "),
        interval = %cfg.interval,
        window = cfg.window_size,
        "ObScan starting"
    );

    let signal_config = match &cfg.strategy_config_path {
        Some(path) => match SignalConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "Cannot start without a valid strategy config");
                std::process::exit(1);
            }
        },
        None => SignalConfig::default(),
    };
    let strategy = OrderBlockStrategy::new(signal_config);
    let settings = BacktestSettings::from(&cfg);

    // ── Market data ───────────────────────────────────────────────────────────
    let client = BinanceClient::new(&cfg.binance_base_url);

    // ── Replay ────────────────────────────────────────────────────────────────
    let results = run_batch(&client, &strategy, &cfg.symbols, &settings).await;

    // ── Export & report ───────────────────────────────────────────────────────
    for result in &results {
        if let Some(reason) = &result.fetch_error {
            warn!(symbol = %result.symbol, error = %reason, "No backtest for symbol");
            continue;
        }
        if !result.has_trades() {
            info!(symbol = %result.symbol, "No valid signals found");
            continue;
        }

        if let Err(e) = write_signals_csv(result, &cfg.output_dir) {
            error!(symbol = %result.symbol, error = %e, "CSV export failed");
        }
        println!("{}", Summary::from_result(result));
    }

    info!(strategy = strategy.name(), symbols = results.len(), "ObScan finished");
}
