use std::path::PathBuf;
use std::time::Duration;

/// Pairs scanned when `SYMBOLS` is not set.
pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "BTC-USDT",
    "ETH-USDT",
    "BNB-USDT",
    "ALT-USDT",
    "APT-USDT",
    "SOL-USDT",
    "DOT-USDT",
    "LINK-USDT",
    "HBAR-USDT",
    "NEAR-USDT",
];

/// All configuration loaded from environment variables at startup.
/// Every variable is optional; malformed numbers fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    // Market data
    pub symbols: Vec<String>,
    pub interval: String,
    pub candle_limit: u32,
    pub binance_base_url: String,

    // Replay
    pub window_size: usize,
    pub lookahead: usize,
    pub symbol_delay: Duration,

    // Output
    pub output_dir: PathBuf,

    // Signal thresholds file (TOML). Built-in defaults when unset.
    pub strategy_config_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            interval: "4h".to_string(),
            candle_limit: 1000,
            binance_base_url: "https://api.binance.com".to_string(),
            window_size: 50,
            lookahead: 19,
            symbol_delay: Duration::from_millis(2000),
            output_dir: PathBuf::from("."),
            strategy_config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let defaults = Config::default();

        let symbols = optional_env("SYMBOLS")
            .map(|v| parse_symbols(&v))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.symbols);

        Config {
            symbols,
            interval: optional_env("INTERVAL").unwrap_or(defaults.interval),
            candle_limit: optional_env("CANDLE_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.candle_limit),
            binance_base_url: optional_env("BINANCE_BASE_URL").unwrap_or(defaults.binance_base_url),
            window_size: optional_env("WINDOW_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_size),
            lookahead: optional_env("LOOKAHEAD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lookahead),
            symbol_delay: optional_env("SYMBOL_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.symbol_delay),
            output_dir: optional_env("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH"),
        }
    }
}

/// Split a comma-separated symbol list, dropping blanks.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
