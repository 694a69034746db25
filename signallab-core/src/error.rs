//! Engine error taxonomy.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the backtest engine.
///
/// Input validation happens before the first step, so an `InvalidInput`
/// error means nothing was executed. `InvalidPrice` aborts mid-run: a bad
/// close would corrupt every later compounding step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid close price {close} on {date}: closes must be positive and finite")]
    InvalidPrice { date: NaiveDate, close: f64 },
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput(_))
    }
}
