//! Performance aggregation over a completed ledger.

use serde::{Deserialize, Serialize};

use crate::domain::TradeRecord;

/// Outcome of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub trades: Vec<TradeRecord>,
    pub initial_capital: f64,
    pub final_capital: f64,
    /// Percentage of trades with positive P&L, 0 when no trades were taken.
    pub win_rate: f64,
    pub total_trades: usize,
    pub successful_trades: usize,
    /// Initial capital followed by the post-trade capital of every trade.
    pub equity_curve: Vec<f64>,
}

impl BacktestResult {
    pub fn has_trades(&self) -> bool {
        !self.trades.is_empty()
    }

    pub fn net_pnl(&self) -> f64 {
        self.final_capital - self.initial_capital
    }
}

/// Reduce the trade records of a run into a `BacktestResult`.
pub fn aggregate(trades: Vec<TradeRecord>, initial_capital: f64) -> BacktestResult {
    let total_trades = trades.len();
    let successful_trades = trades.iter().filter(|t| t.is_winner()).count();
    let win_rate = if total_trades > 0 {
        successful_trades as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };
    let final_capital = trades.last().map_or(initial_capital, |t| t.capital);

    let mut equity_curve = Vec::with_capacity(total_trades + 1);
    equity_curve.push(initial_capital);
    equity_curve.extend(trades.iter().map(|t| t.capital));

    BacktestResult {
        trades,
        initial_capital,
        final_capital,
        win_rate,
        total_trades,
        successful_trades,
        equity_curve,
    }
}
