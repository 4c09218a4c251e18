//! Ledger configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, or
//!    ~/.local/share/blockledger/config/blockledger.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Every key is optional; missing keys keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/blockledger.toml");

/// Accepted range for trailing windows, in days
const WINDOW_DAYS: std::ops::RangeInclusive<i64> = 1..=36500;

/// Slot keys used by the persistence gateway
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub data_key: String,
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_key: "blockledger_data".to_string(),
            user_key: "blockledger_user".to_string(),
        }
    }
}

/// Thresholds for the oracle rules
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    /// Trailing window for the income streak check
    pub recent_days: i64,
    /// Below this many log entries the oracle asks for more
    pub log_threshold: usize,
    /// Net worth above which an empty portfolio is flagged
    pub investment_threshold: f64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            log_threshold: 5,
            investment_threshold: 1000.0,
        }
    }
}

/// Keyword lists for the activity chronicle
#[derive(Debug, Clone, PartialEq)]
pub struct ChronicleConfig {
    pub recent_days: i64,
    pub provision_keywords: Vec<String>,
    pub trade_keywords: Vec<String>,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            provision_keywords: ["zomato", "swiggy", "food", "grocery"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            trade_keywords: ["amazon", "flipkart", "shop"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Settings for the investment trend forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub min_history: usize,
    pub default_horizon_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history: 10,
            default_horizon_days: 30,
        }
    }
}

/// Complete ledger configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerConfig {
    pub storage: StorageConfig,
    pub oracle: OracleConfig,
    pub chronicle: ChronicleConfig,
    pub forecast: ForecastConfig,
}

impl LedgerConfig {
    /// Load from an explicit path, the default override location, or the
    /// embedded defaults, in that order
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) if path.exists() => read_config(path)?,
            Some(path) => {
                debug!(path = %path.display(), "Config override not found, using defaults");
                DEFAULT_CONFIG.to_string()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("blockledger").join("config").join("blockledger.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Loading config override");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    oracle: Option<RawOracle>,
    chronicle: Option<RawChronicle>,
    forecast: Option<RawForecast>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    data_key: Option<String>,
    user_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOracle {
    recent_days: Option<i64>,
    log_threshold: Option<usize>,
    investment_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawChronicle {
    recent_days: Option<i64>,
    provision_keywords: Option<Vec<String>>,
    trade_keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    min_history: Option<usize>,
    default_horizon_days: Option<u32>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<LedgerConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = LedgerConfig::default();

    if let Some(storage) = raw.storage {
        if let Some(key) = storage.data_key {
            config.storage.data_key = key;
        }
        if let Some(key) = storage.user_key {
            config.storage.user_key = key;
        }
    }

    if let Some(oracle) = raw.oracle {
        if let Some(days) = oracle.recent_days {
            config.oracle.recent_days = days;
        }
        if let Some(threshold) = oracle.log_threshold {
            config.oracle.log_threshold = threshold;
        }
        if let Some(threshold) = oracle.investment_threshold {
            config.oracle.investment_threshold = threshold;
        }
    }

    if let Some(chronicle) = raw.chronicle {
        if let Some(days) = chronicle.recent_days {
            config.chronicle.recent_days = days;
        }
        if let Some(words) = chronicle.provision_keywords {
            config.chronicle.provision_keywords = lowercase_all(words);
        }
        if let Some(words) = chronicle.trade_keywords {
            config.chronicle.trade_keywords = lowercase_all(words);
        }
    }

    if let Some(forecast) = raw.forecast {
        if let Some(min) = forecast.min_history {
            config.forecast.min_history = min;
        }
        if let Some(days) = forecast.default_horizon_days {
            config.forecast.default_horizon_days = days;
        }
    }

    check_window("oracle.recent_days", config.oracle.recent_days)?;
    check_window("chronicle.recent_days", config.chronicle.recent_days)?;
    if !config.oracle.investment_threshold.is_finite() {
        return Err(Error::Config(format!(
            "oracle.investment_threshold must be a finite number, got {}",
            config.oracle.investment_threshold
        )));
    }

    if config.storage.data_key == config.storage.user_key {
        return Err(Error::Config(
            "storage.data_key and storage.user_key must differ".to_string(),
        ));
    }

    Ok(config)
}

fn check_window(key: &str, days: i64) -> Result<()> {
    if WINDOW_DAYS.contains(&days) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be between {} and {} days, got {}",
            key,
            WINDOW_DAYS.start(),
            WINDOW_DAYS.end(),
            days
        )))
    }
}

fn lowercase_all(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [oracle]
            investment_threshold = 5000.0

            [chronicle]
            trade_keywords = ["Market"]
            "#,
        )
        .unwrap();

        assert_eq!(config.oracle.investment_threshold, 5000.0);
        assert_eq!(config.oracle.recent_days, 30);
        assert_eq!(config.chronicle.trade_keywords, vec!["market"]);
        assert_eq!(config.storage.data_key, "blockledger_data");
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[oracle\nrecent_days = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_same_slot_keys_rejected() {
        let err = parse_config(
            r#"
            [storage]
            data_key = "shared"
            user_key = "shared"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        for content in [
            "[oracle]\nrecent_days = 1000000000\n",
            "[oracle]\nrecent_days = 0\n",
            "[chronicle]\nrecent_days = -7\n",
            "[chronicle]\nrecent_days = 36501\n",
        ] {
            let err = parse_config(content).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{}", content);
            assert!(err.to_string().contains("recent_days"));
        }

        let config = parse_config("[oracle]\nrecent_days = 36500\n").unwrap();
        assert_eq!(config.oracle.recent_days, 36500);
    }

    #[test]
    fn test_non_finite_investment_threshold_rejected() {
        for value in ["nan", "inf", "-inf"] {
            let content = format!("[oracle]\ninvestment_threshold = {}\n", value);
            let err = parse_config(&content).unwrap_err();
            assert!(err.to_string().contains("investment_threshold"), "{}", value);
        }
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        let config = LedgerConfig::load(Some(Path::new("/nonexistent/blockledger.toml"))).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        fs::write(&path, "[forecast]\nmin_history = 3\n").unwrap();

        let config = LedgerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.forecast.min_history, 3);
        assert_eq!(config.forecast.default_horizon_days, 30);
    }
}
