//! TOML backtest configuration.
//!
//! ```toml
//! [backtest]
//! symbol = "^NSEI"
//! threshold = 0.6
//! initial_capital = 100000
//!
//! [data]
//! prices = "data/prices.csv"
//! confidences = "data/confidences.csv"
//! ```
//!
//! `[data]` may be replaced by `[synthetic]` (`bars`, `seed`) for demo runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use signallab_core::engine::{EngineConfig, DEFAULT_INITIAL_CAPITAL};
use signallab_core::signals::DEFAULT_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    #[serde(default)]
    pub data: Option<DataSection>,
    #[serde(default)]
    pub synthetic: Option<SyntheticSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestSection {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

/// CSV inputs, resolved relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSection {
    pub prices: PathBuf,
    pub confidences: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntheticSection {
    #[serde(default = "default_synthetic_bars")]
    pub bars: usize,
    #[serde(default)]
    pub seed: u64,
}

/// Where a run's inputs come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv { prices: PathBuf, confidences: PathBuf },
    Synthetic { bars: usize, seed: u64 },
}

fn default_symbol() -> String {
    "UNKNOWN".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

fn default_synthetic_bars() -> usize {
    252
}

impl Default for BacktestSection {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            threshold: default_threshold(),
            initial_capital: default_initial_capital(),
        }
    }
}

impl BacktestConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Config for CSV inputs with default engine settings.
    pub fn for_csv(symbol: &str, prices: PathBuf, confidences: PathBuf) -> Self {
        Self {
            backtest: BacktestSection {
                symbol: symbol.to_string(),
                ..BacktestSection::default()
            },
            data: Some(DataSection { prices, confidences }),
            synthetic: None,
        }
    }

    /// Config for a seeded synthetic run with default engine settings.
    pub fn for_synthetic(bars: usize, seed: u64) -> Self {
        Self {
            backtest: BacktestSection {
                symbol: "SYNTHETIC".to_string(),
                ..BacktestSection::default()
            },
            data: None,
            synthetic: Some(SyntheticSection { bars, seed }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        match (&self.data, &self.synthetic) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "[data] and [synthetic] are mutually exclusive".into(),
            )),
            (None, None) => Err(ConfigError::Invalid(
                "one of [data] or [synthetic] is required".into(),
            )),
            (None, Some(s)) if s.bars < 2 => Err(ConfigError::Invalid(format!(
                "synthetic run needs at least 2 bars, got {}",
                s.bars
            ))),
            _ => Ok(()),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.backtest.threshold, self.backtest.initial_capital)
    }

    pub fn data_source(&self) -> Result<DataSource, ConfigError> {
        match (&self.data, &self.synthetic) {
            (Some(d), None) => Ok(DataSource::Csv {
                prices: d.prices.clone(),
                confidences: d.confidences.clone(),
            }),
            (None, Some(s)) => Ok(DataSource::Synthetic {
                bars: s.bars,
                seed: s.seed,
            }),
            _ => Err(ConfigError::Invalid(
                "exactly one of [data] or [synthetic] is required".into(),
            )),
        }
    }
}
