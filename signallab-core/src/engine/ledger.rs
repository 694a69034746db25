//! Capital ledger: the only sequential state of a run.
//!
//! The ledger is an accumulator value: each step consumes it and returns the
//! next one, so the orchestrator can drive it with a plain fold. Capital is
//! kept at full precision; only the appended records are rounded.

use chrono::NaiveDate;

use crate::domain::trade::round2;
use crate::domain::TradeRecord;
use crate::signals::TradeIntent;

#[derive(Debug, Clone, PartialEq)]
pub struct CapitalLedger {
    initial_capital: f64,
    capital: f64,
    records: Vec<TradeRecord>,
}

impl CapitalLedger {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            capital: initial_capital,
            records: Vec::new(),
        }
    }

    /// Apply one step. `NoTrade` returns the ledger unchanged.
    pub fn apply_step(
        mut self,
        date: NaiveDate,
        intent: TradeIntent,
        confidence: f64,
        pnl: f64,
    ) -> Self {
        let Some(trade_type) = intent.trade_type() else {
            return self;
        };

        self.capital += pnl;
        self.records.push(TradeRecord {
            date,
            trade_type,
            confidence: round2(confidence),
            pnl: round2(pnl),
            capital: round2(self.capital),
        });
        self
    }

    /// Full-precision running balance; the capital at risk for the next step.
    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }
}
