//! SignalLab Core: signal-driven leveraged backtesting engine.
//!
//! This crate turns (confidence scores, closing prices, threshold) into a
//! trade ledger, an equity curve and summary statistics:
//! - Domain types (price points, trade records, content-addressed IDs)
//! - Signal classifier with a symmetric dead zone
//! - Leveraged payoff approximation with an asymmetric loss cap
//! - Compounding capital ledger driven as a fold
//! - Aggregation into win rate, final capital and equity curve
//!
//! No I/O happens here; data loading and reporting live in `signallab-runner`.

pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod signals;

pub use engine::{run_backtest, BacktestResult, EngineConfig};
pub use error::EngineError;
