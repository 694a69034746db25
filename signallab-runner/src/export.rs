//! Artifact export: trade tape, equity curve, and the full report.
//!
//! Layout: `<output_dir>/<run_id prefix>/{trades.csv, equity.csv, result.json}`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use signallab_core::domain::{TradeRecord, TradeType};

use crate::runner::BacktestReport;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub run_dir: PathBuf,
    pub trades_csv: PathBuf,
    pub equity_csv: PathBuf,
    pub result_json: PathBuf,
}

/// Manages writing all artifacts for a run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    pub fn save_run(&self, report: &BacktestReport) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(report.fingerprint.run_id.short());
        std::fs::create_dir_all(&run_dir).context("Failed to create run artifact directory")?;

        let trades_csv = run_dir.join("trades.csv");
        write_trades_csv(&trades_csv, &report.result.trades)?;

        let equity_csv = run_dir.join("equity.csv");
        write_equity_csv(&equity_csv, &equity_points(report))?;

        let result_json = run_dir.join("result.json");
        write_report_json(&result_json, report)?;

        Ok(ArtifactPaths {
            run_dir,
            trades_csv,
            equity_csv,
            result_json,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TradeRow {
    date: NaiveDate,
    #[serde(rename = "type")]
    trade_type: TradeType,
    confidence: f64,
    pnl: f64,
    capital: f64,
}

/// One dated point of the per-trade equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub capital: f64,
}

/// Equity curve with dates: the first price date carries the initial
/// capital, then one point per trade at its entry date.
pub fn equity_points(report: &BacktestReport) -> Vec<EquityPoint> {
    let result = &report.result;
    let mut points = Vec::with_capacity(result.trades.len() + 1);
    if let Some(start) = report.fingerprint.start_date {
        points.push(EquityPoint {
            date: start,
            capital: result.initial_capital,
        });
    }
    points.extend(result.trades.iter().map(|t| EquityPoint {
        date: t.date,
        capital: t.capital,
    }));
    points
}

pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;
    if trades.is_empty() {
        writer.write_record(["date", "type", "confidence", "pnl", "capital"])?;
    }
    for t in trades {
        writer.serialize(TradeRow {
            date: t.date,
            trade_type: t.trade_type,
            confidence: t.confidence,
            pnl: t.pnl,
            capital: t.capital,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_equity_csv(path: &Path, points: &[EquityPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;
    if points.is_empty() {
        writer.write_record(["date", "capital"])?;
    }
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_json(path: &Path, report: &BacktestReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report JSON {}", path.display()))?;
    Ok(())
}

/// Read back a report written by `write_report_json`.
pub fn load_report(path: &Path) -> Result<BacktestReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report JSON {}", path.display()))?;
    serde_json::from_str(&text).context("Failed to parse report JSON")
}
