//! Threshold sweep: independent runs over the same inputs.
//!
//! Each threshold gets its own engine instance and ledger, so the runs share
//! nothing but the read-only input series and execute in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use signallab_core::engine::EngineConfig;

use crate::data_loader::LoadedData;
use crate::runner::{run_backtest_from_data, RunError};

/// Summary of one threshold's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub threshold: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    pub final_capital: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
}

/// Evenly spaced thresholds from `start` to `end` inclusive.
pub fn threshold_grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end < start {
        return vec![start];
    }
    let n = ((end - start) / step + 1e-9).floor() as usize;
    (0..=n)
        .map(|i| ((start + i as f64 * step) * 1e6).round() / 1e6)
        .collect()
}

/// Run every threshold in parallel. Rows come back in input order.
pub fn sweep_thresholds(
    loaded: &LoadedData,
    symbol: &str,
    thresholds: &[f64],
    initial_capital: f64,
) -> Result<Vec<SweepRow>, RunError> {
    let rows = thresholds
        .par_iter()
        .map(|&threshold| {
            let config = EngineConfig::new(threshold, initial_capital);
            let report = run_backtest_from_data(loaded, symbol, &config)?;
            Ok(SweepRow {
                threshold,
                total_trades: report.result.total_trades,
                win_rate: report.result.win_rate,
                final_capital: report.result.final_capital,
                total_return: report.metrics.total_return,
                max_drawdown: report.metrics.max_drawdown,
            })
        })
        .collect::<Result<Vec<_>, RunError>>()?;

    if let Some(best) = best_by_final_capital(&rows) {
        info!(
            runs = rows.len(),
            best_threshold = best.threshold,
            best_final_capital = best.final_capital,
            "sweep complete"
        );
    }
    Ok(rows)
}

/// Row with the highest final capital; ties keep the earliest row.
pub fn best_by_final_capital(rows: &[SweepRow]) -> Option<&SweepRow> {
    rows.iter().fold(None, |best: Option<&SweepRow>, row| match best {
        Some(b) if b.final_capital >= row.final_capital => Some(b),
        _ => Some(row),
    })
}
