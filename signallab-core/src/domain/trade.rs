//! TradeRecord: one realized single-period trade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction proxy of a trade: long via calls, short via puts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Call,
    Put,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Call => "CALL",
            TradeType::Put => "PUT",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trade entered at the close of `date` and marked at the next close.
///
/// `confidence`, `pnl` and `capital` are rounded to cents for reporting.
/// The ledger compounds on full-precision capital, so these values are never
/// fed back into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub trade_type: TradeType,
    pub confidence: f64,
    pub pnl: f64,
    pub capital: f64,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
