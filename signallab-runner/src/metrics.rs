//! Supplementary performance metrics: pure functions over a finished run.
//!
//! Every metric takes the per-trade equity curve and/or the trade list and
//! returns a scalar. Win rate and final capital come from the engine itself.

use serde::{Deserialize, Serialize};
use signallab_core::domain::{TradeRecord, TradeType};
use signallab_core::BacktestResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub max_drawdown: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub call_count: usize,
    pub put_count: usize,
}

impl PerformanceMetrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let trades = &result.trades;
        Self {
            total_return: total_return(&result.equity_curve),
            max_drawdown: max_drawdown(&result.equity_curve),
            profit_factor: profit_factor(trades),
            avg_win: avg_pnl(trades, true),
            avg_loss: avg_pnl(trades, false),
            max_consecutive_wins: max_consecutive(trades, true),
            max_consecutive_losses: max_consecutive(trades, false),
            call_count: count_type(trades, TradeType::Call),
            put_count: count_type(trades, TradeType::Put),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equity_curve: &[f64]) -> f64 {
    match (equity_curve.first(), equity_curve.last()) {
        (Some(&initial), Some(&final_eq)) if equity_curve.len() >= 2 && initial > 0.0 => {
            (final_eq - initial) / initial
        }
        _ => 0.0,
    }
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown).
///
/// Sampled at trade events only, like the equity curve itself.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = match equity_curve.first() {
        Some(&first) => first,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for &eq in equity_curve {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Profit factor: gross profits / gross losses.
///
/// Capped at 100.0 for edge cases (all winners, zero losses).
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 { 100.0 } else { 0.0 };
    }
    (gross_profit / gross_loss).min(100.0)
}

/// Mean P&L of winning (`winners = true`) or non-winning trades.
pub fn avg_pnl(trades: &[TradeRecord], winners: bool) -> f64 {
    let selected: Vec<f64> = trades
        .iter()
        .filter(|t| t.is_winner() == winners)
        .map(|t| t.pnl)
        .collect();
    if selected.is_empty() {
        return 0.0;
    }
    selected.iter().sum::<f64>() / selected.len() as f64
}

/// Longest run of consecutive winners (`winners = true`) or non-winners.
pub fn max_consecutive(trades: &[TradeRecord], winners: bool) -> usize {
    let mut max_streak = 0;
    let mut current = 0;

    for trade in trades {
        if trade.is_winner() == winners {
            current += 1;
            max_streak = max_streak.max(current);
        } else {
            current = 0;
        }
    }
    max_streak
}

fn count_type(trades: &[TradeRecord], trade_type: TradeType) -> usize {
    trades.iter().filter(|t| t.trade_type == trade_type).count()
}
