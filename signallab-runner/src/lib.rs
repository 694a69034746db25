//! SignalLab Runner: backtest orchestration, threshold sweeps, reports.
//!
//! This crate builds on `signallab-core` to provide:
//! - TOML configuration
//! - CSV loading with alignment, plus seeded synthetic data
//! - Single-run orchestration with fingerprint and metrics
//! - Parallel threshold sweeps
//! - Plain-text reports and CSV/JSON artifacts

pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod sweep;

pub use config::{BacktestConfig, ConfigError, DataSource};
pub use data_loader::{load_data, LoadError, LoadedData};
pub use export::{ArtifactManager, ArtifactPaths};
pub use metrics::PerformanceMetrics;
pub use report::{format_suggestion, format_summary, format_sweep_table};
pub use runner::{run_backtest_from_data, run_single_backtest, BacktestReport, RunError};
pub use sweep::{sweep_thresholds, threshold_grid, SweepRow};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn backtest_report_is_send_sync() {
        assert_send::<BacktestReport>();
        assert_sync::<BacktestReport>();
    }

    #[test]
    fn loaded_data_is_send_sync() {
        assert_send::<LoadedData>();
        assert_sync::<LoadedData>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
        assert_send::<DataSource>();
        assert_sync::<DataSource>();
    }

    #[test]
    fn sweep_row_is_send_sync() {
        assert_send::<SweepRow>();
        assert_sync::<SweepRow>();
    }

    #[test]
    fn run_error_is_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
