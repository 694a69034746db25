//! Backtest runner: wires together data loading, the engine, and metrics.
//!
//! Two entry points:
//! - `run_single_backtest()`: loads inputs named by a `BacktestConfig`, then runs. Used by CLI.
//! - `run_backtest_from_data()`: takes pre-loaded data. Used by threshold sweeps.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use signallab_core::engine::{run_backtest, EngineConfig};
use signallab_core::fingerprint::RunFingerprint;
use signallab_core::{BacktestResult, EngineError};

use crate::config::{BacktestConfig, ConfigError};
use crate::data_loader::{load_data, LoadError, LoadedData};
use crate::metrics::PerformanceMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub fingerprint: RunFingerprint,
    pub result: BacktestResult,
    pub metrics: PerformanceMetrics,
    pub has_synthetic: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BacktestReport {
    pub fn run_id(&self) -> &str {
        &self.fingerprint.run_id.0
    }

    pub fn threshold(&self) -> f64 {
        self.fingerprint.config.threshold
    }
}

/// Run a single backtest from a `BacktestConfig` (loads data first).
pub fn run_single_backtest(config: &BacktestConfig) -> Result<BacktestReport, RunError> {
    config.validate()?;
    let loaded = load_data(&config.data_source()?)?;
    run_backtest_from_data(&loaded, &config.backtest.symbol, &config.engine_config())
}

/// Run a backtest on pre-loaded data: no I/O.
pub fn run_backtest_from_data(
    loaded: &LoadedData,
    symbol: &str,
    engine_config: &EngineConfig,
) -> Result<BacktestReport, RunError> {
    let result = run_backtest(&loaded.prices, &loaded.confidences, engine_config)?;
    let fingerprint = RunFingerprint::new(engine_config, &loaded.prices, &loaded.confidences);
    let metrics = PerformanceMetrics::compute(&result);

    info!(
        symbol,
        run_id = %fingerprint.run_id.short(),
        synthetic = loaded.has_synthetic,
        "run finished"
    );

    Ok(BacktestReport {
        schema_version: SCHEMA_VERSION,
        symbol: symbol.to_string(),
        fingerprint,
        result,
        metrics,
        has_synthetic: loaded.has_synthetic,
    })
}
