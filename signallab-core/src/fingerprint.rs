//! Run fingerprinting: deterministic identification of a run's inputs.
//!
//! - `dataset_hash()`: BLAKE3 over every (date, close, confidence) fed to the engine.
//! - `RunFingerprint`: engine parameters + dataset hash + date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DatasetHash, PricePoint, RunId};
use crate::engine::EngineConfig;

/// Hash the aligned inputs of a run.
///
/// Floats are hashed by bit pattern, so two datasets collide only if every
/// value is bit-identical.
pub fn dataset_hash(prices: &[PricePoint], confidences: &[f64]) -> DatasetHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(prices.len() as u64).to_le_bytes());
    for p in prices {
        hasher.update(p.date.to_string().as_bytes());
        hasher.update(&p.close.to_bits().to_le_bytes());
    }
    hasher.update(&(confidences.len() as u64).to_le_bytes());
    for c in confidences {
        hasher.update(&c.to_bits().to_le_bytes());
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

/// Complete identity of a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub run_id: RunId,
    pub dataset_hash: DatasetHash,
    pub config: EngineConfig,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price_count: usize,
}

impl RunFingerprint {
    pub fn new(config: &EngineConfig, prices: &[PricePoint], confidences: &[f64]) -> Self {
        let dataset_hash = dataset_hash(prices, confidences);
        Self {
            run_id: RunId::derive(&config.canonical_params(), &dataset_hash),
            dataset_hash,
            config: *config,
            start_date: prices.first().map(|p| p.date),
            end_date: prices.last().map(|p| p.date),
            price_count: prices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> Vec<PricePoint> {
        vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100.0),
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 101.0),
        ]
    }

    #[test]
    fn dataset_hash_is_deterministic() {
        assert_eq!(dataset_hash(&prices(), &[0.7]), dataset_hash(&prices(), &[0.7]));
    }

    #[test]
    fn dataset_hash_sees_confidence_changes() {
        assert_ne!(dataset_hash(&prices(), &[0.7]), dataset_hash(&prices(), &[0.71]));
    }

    #[test]
    fn fingerprint_run_id_depends_on_threshold() {
        let a = RunFingerprint::new(&EngineConfig::new(0.6, 100_000.0), &prices(), &[0.7]);
        let b = RunFingerprint::new(&EngineConfig::new(0.55, 100_000.0), &prices(), &[0.7]);
        assert_eq!(a.dataset_hash, b.dataset_hash);
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.price_count, 2);
        assert_eq!(a.start_date, NaiveDate::from_ymd_opt(2024, 1, 2));
    }
}
