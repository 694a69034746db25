//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::payoff::PayoffModel;
use crate::error::EngineError;
use crate::signals::DEFAULT_THRESHOLD;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

/// Configuration for a single backtest run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub threshold: f64,
    pub initial_capital: f64,
    pub payoff: PayoffModel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_INITIAL_CAPITAL)
    }
}

impl EngineConfig {
    pub fn new(threshold: f64, initial_capital: f64) -> Self {
        Self {
            threshold,
            initial_capital,
            payoff: PayoffModel::default(),
        }
    }

    /// Threshold must lie in (0, 1) and capital must be positive.
    ///
    /// A threshold at or below 0.5 is accepted: the classifier inequalities
    /// still define the outcome, there is just no dead zone.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(EngineError::invalid_input(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(EngineError::invalid_input(format!(
                "initial capital must be positive, got {}",
                self.initial_capital
            )));
        }
        Ok(())
    }

    pub fn has_dead_zone(&self) -> bool {
        self.threshold > 0.5
    }

    /// Canonical parameter string used for run fingerprints.
    pub fn canonical_params(&self) -> String {
        format!(
            "threshold={:?};initial_capital={:?};risk_fraction={:?};leverage_factor={:?}",
            self.threshold,
            self.initial_capital,
            self.payoff.risk_fraction,
            self.payoff.leverage_factor
        )
    }
}
