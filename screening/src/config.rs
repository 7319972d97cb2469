//! Screener configuration
//!
//! Thresholds and run settings are loaded from a TOML file and passed into
//! the pipeline as an immutable value; nothing reads configuration from
//! ambient state. Every field has a default so a partial file (or none at
//! all) yields the reference behavior.

use serde::{Deserialize, Serialize};

use crate::fundamentals::FundamentalThresholds;

/// Full configuration for one screening run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Fundamental filter thresholds.
    #[serde(default)]
    pub fundamental: FundamentalThresholds,

    /// Data-fetch settings.
    #[serde(default)]
    pub data: DataConfig,
}

/// Settings for the data-fetch stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Symbol whose history drives regime classification.
    #[serde(default = "default_index_symbol")]
    pub index_symbol: String,

    /// Trailing calendar days of daily history to request; 30 days covers
    /// the 15 trading sessions the regime classifier needs.
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Concurrent fundamentals/history fetches. Output order is always the
    /// universe order; 1 reproduces fully sequential fetching.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Optional cap on the universe size, for quick partial runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe_limit: Option<usize>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            index_symbol: default_index_symbol(),
            history_days: default_history_days(),
            fetch_concurrency: default_fetch_concurrency(),
            universe_limit: None,
        }
    }
}

fn default_index_symbol() -> String {
    "^NSEI".to_string()
}

fn default_history_days() -> u32 {
    30
}

fn default_fetch_concurrency() -> usize {
    8
}

/// Load configuration from a TOML file.
pub fn load_config(path: &str) -> anyhow::Result<ScreenerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ScreenerConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Write the default configuration to a TOML file; the reset-to-defaults
/// action.
pub fn write_default_config(path: &str) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(&ScreenerConfig::default())?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreenerConfig::default();
        assert_eq!(config.fundamental.market_cap_min, 1000.0);
        assert_eq!(config.fundamental.promoter_holding_min, 50.0);
        assert!(config.fundamental.include_bfsi);
        assert_eq!(config.data.index_symbol, "^NSEI");
        assert_eq!(config.data.history_days, 30);
        assert_eq!(config.data.universe_limit, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ScreenerConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: ScreenerConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config.fundamental.pe_max, deserialized.fundamental.pe_max);
        assert_eq!(config.data.fetch_concurrency, deserialized.data.fetch_concurrency);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ScreenerConfig = toml::from_str(
            "[fundamental]\nde_max = 1.0\n\n[data]\nuniverse_limit = 25\n",
        )
        .unwrap();
        assert_eq!(config.fundamental.de_max, 1.0);
        assert_eq!(config.fundamental.pe_max, 30.0);
        assert_eq!(config.data.universe_limit, Some(25));
        assert_eq!(config.data.index_symbol, "^NSEI");
    }
}
