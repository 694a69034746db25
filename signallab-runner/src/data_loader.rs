//! Price and confidence loading for the runner.
//!
//! Inputs are materialized in memory before the engine starts:
//! 1. Prices CSV → `Vec<PricePoint>` (date + close columns, any extra columns ignored)
//! 2. Confidences CSV → `Vec<f64>` (one numeric column)
//! 3. Alignment: a price table longer than the confidence series is cut to
//!    the series length, the same way the model's test window is lined up
//!    with its predictions
//!
//! Synthetic data (seeded random walk + uniform scores) is a developer-only
//! mode. Results produced on it are tagged.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use signallab_core::domain::{DatasetHash, PricePoint};
use signallab_core::fingerprint::dataset_hash;

use crate::config::DataSource;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("{path}: no '{column}' column in header")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}, row {row}: {reason}")]
    BadRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("{path}: dates are not strictly increasing at row {row} ({date})")]
    Unordered {
        path: PathBuf,
        row: usize,
        date: NaiveDate,
    },

    #[error("{confidences} confidence values but only {prices} price points")]
    Misaligned { prices: usize, confidences: usize },

    #[error("no data: {0}")]
    Empty(String),
}

/// Inputs of one run plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub prices: Vec<PricePoint>,
    pub confidences: Vec<f64>,
    pub dataset_hash: DatasetHash,
    pub has_synthetic: bool,
}

impl LoadedData {
    /// Align the two series and fingerprint them.
    pub fn new(
        prices: Vec<PricePoint>,
        confidences: Vec<f64>,
        has_synthetic: bool,
    ) -> Result<Self, LoadError> {
        let (prices, confidences) = align(prices, confidences)?;
        let dataset_hash = dataset_hash(&prices, &confidences);
        Ok(Self {
            prices,
            confidences,
            dataset_hash,
            has_synthetic,
        })
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.prices.first().map(|p| p.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.prices.last().map(|p| p.date)
    }

    pub fn last_price(&self) -> Option<&PricePoint> {
        self.prices.last()
    }
}

/// Load the inputs named by `source`.
pub fn load_data(source: &DataSource) -> Result<LoadedData, LoadError> {
    match source {
        DataSource::Csv {
            prices,
            confidences,
        } => {
            let p = load_prices_csv(prices)?;
            let c = load_confidences_csv(confidences)?;
            info!(prices = p.len(), confidences = c.len(), "loaded CSV inputs");
            LoadedData::new(p, c, false)
        }
        DataSource::Synthetic { bars, seed } => {
            warn!(
                bars,
                seed,
                "generating synthetic data; results will be tagged as synthetic"
            );
            let (p, c) = generate_synthetic(*bars, *seed);
            LoadedData::new(p, c, true)
        }
    }
}

/// Trim the price table so every score keeps its next close.
///
/// `n` prices pair with `n` or `n - 1` scores and pass through untouched.
/// A longer price table is cut to `confidences + 1` rows.
pub fn align(
    mut prices: Vec<PricePoint>,
    confidences: Vec<f64>,
) -> Result<(Vec<PricePoint>, Vec<f64>), LoadError> {
    if confidences.len() > prices.len() {
        return Err(LoadError::Misaligned {
            prices: prices.len(),
            confidences: confidences.len(),
        });
    }
    let keep = confidences.len() + 1;
    if prices.len() > keep {
        warn!(
            prices = prices.len(),
            confidences = confidences.len(),
            "price table longer than confidence series; truncating to align"
        );
        prices.truncate(keep);
    }
    Ok((prices, confidences))
}

/// Read `date`/`close` columns (case-insensitive) from a CSV with a header row.
///
/// Dates may carry a time suffix (`2024-01-02 00:00:00+05:30`); only the
/// leading `YYYY-MM-DD` is used.
pub fn load_prices_csv(path: &Path) -> Result<Vec<PricePoint>, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let date_idx = find_column(&headers, &["date", "datetime", "timestamp"])
        .ok_or_else(|| missing(path, "date"))?;
    let close_idx = find_column(&headers, &["close", "adj close", "adj_close"])
        .ok_or_else(|| missing(path, "close"))?;

    let mut prices: Vec<PricePoint> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = record.map_err(csv_err)?;
        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date)
            .ok_or_else(|| bad_row(path, row, format!("bad date '{raw_date}'")))?;
        let raw_close = record.get(close_idx).unwrap_or_default();
        let close: f64 = raw_close
            .parse()
            .map_err(|_| bad_row(path, row, format!("bad close '{raw_close}'")))?;

        if let Some(prev) = prices.last() {
            if date <= prev.date {
                return Err(LoadError::Unordered {
                    path: path.to_path_buf(),
                    row,
                    date,
                });
            }
        }
        prices.push(PricePoint::new(date, close));
    }

    if prices.is_empty() {
        return Err(LoadError::Empty(format!("{} has no price rows", path.display())));
    }
    Ok(prices)
}

/// Read one confidence score per row.
///
/// Uses a `confidence`, `prediction` or `score` column if present, otherwise
/// the first column.
pub fn load_confidences_csv(path: &Path) -> Result<Vec<f64>, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let idx = find_column(&headers, &["confidence", "prediction", "score"]).unwrap_or(0);

    let mut out = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let raw = record.get(idx).unwrap_or_default();
        let value: f64 = raw
            .parse()
            .map_err(|_| bad_row(path, i + 2, format!("bad confidence '{raw}'")))?;
        out.push(value);
    }

    if out.is_empty() {
        return Err(LoadError::Empty(format!("{} has no confidence rows", path.display())));
    }
    Ok(out)
}

/// Seeded random walk (±3% daily, weekdays only) with uniform scores in [0, 1).
pub fn generate_synthetic(bars: usize, seed: u64) -> (Vec<PricePoint>, Vec<f64>) {
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut prices = Vec::with_capacity(bars);
    let mut confidences = Vec::with_capacity(bars);
    let mut price = 100.0_f64;
    let mut current = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);

    while prices.len() < bars {
        let weekday = current.weekday();
        if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
            prices.push(PricePoint::new(current, price));
            confidences.push(rng.gen_range(0.0..1.0));
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;
        }
        current += chrono::Duration::days(1);
    }

    (prices, confidences)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn missing(path: &Path, column: &str) -> LoadError {
    LoadError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    }
}

fn bad_row(path: &Path, row: usize, reason: String) -> LoadError {
    LoadError::BadRow {
        path: path.to_path_buf(),
        row,
        reason,
    }
}
