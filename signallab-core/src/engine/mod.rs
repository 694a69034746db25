//! Backtesting engine.
//!
//! One pass per run, strictly in time order:
//!
//! 1. Classify the step's confidence score into a trade intent
//! 2. Simulate the leveraged payoff against the next close
//! 3. Apply the P&L to the capital ledger
//!
//! After the last step the ledger is reduced into a `BacktestResult`.

pub mod aggregate;
pub mod ledger;
pub mod loop_runner;
pub mod payoff;
pub mod state;

pub use aggregate::{aggregate, BacktestResult};
pub use ledger::CapitalLedger;
pub use loop_runner::run_backtest;
pub use payoff::{fractional_change, PayoffModel, LEVERAGE_FACTOR, RISK_FRACTION};
pub use state::{EngineConfig, DEFAULT_INITIAL_CAPITAL};
