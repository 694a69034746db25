//! Plain-text report formatting.

use std::fmt::Write;

use signallab_core::signals::Suggestion;

use crate::runner::BacktestReport;
use crate::sweep::SweepRow;

/// Multi-line run summary: capital, win rate, trade count, then extras.
pub fn format_summary(report: &BacktestReport) -> String {
    let r = &report.result;
    let m = &report.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "Backtest Results: {}", report.symbol);
    if report.has_synthetic {
        let _ = writeln!(out, "  (synthetic data)");
    }
    let _ = writeln!(out, "Threshold:       {:.2}", report.threshold());
    if let (Some(start), Some(end)) = (report.fingerprint.start_date, report.fingerprint.end_date) {
        let _ = writeln!(out, "Period:          {start} .. {end}");
    }
    let _ = writeln!(out, "Initial Capital: {:.2}", r.initial_capital);
    let _ = writeln!(out, "Final Capital:   {:.2}", r.final_capital);
    let _ = writeln!(out, "Win Rate:        {:.2}%", r.win_rate);
    let _ = writeln!(out, "Total Trades:    {}", r.total_trades);

    if !r.has_trades() {
        let _ = writeln!(out, "No trades taken.");
        return out;
    }

    let _ = writeln!(out, "  Calls / Puts:  {} / {}", m.call_count, m.put_count);
    let _ = writeln!(out, "  Total Return:  {:.2}%", m.total_return * 100.0);
    let _ = writeln!(out, "  Max Drawdown:  {:.2}%", m.max_drawdown * 100.0);
    let _ = writeln!(out, "  Profit Factor: {:.2}", m.profit_factor);
    let _ = writeln!(out, "  Avg Win/Loss:  {:.2} / {:.2}", m.avg_win, m.avg_loss);
    let _ = writeln!(
        out,
        "  Streaks:       {} wins / {} losses",
        m.max_consecutive_wins, m.max_consecutive_losses
    );
    out
}

/// Fixed-width table, one row per threshold.
pub fn format_sweep_table(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>9} {:>7} {:>9} {:>15} {:>9} {:>9}",
        "threshold", "trades", "win_rate", "final_capital", "return", "max_dd"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>9.2} {:>7} {:>8.2}% {:>15.2} {:>8.2}% {:>8.2}%",
            row.threshold,
            row.total_trades,
            row.win_rate,
            row.final_capital,
            row.total_return * 100.0,
            row.max_drawdown * 100.0
        );
    }
    out
}

/// Suggestion block for the latest session.
pub fn format_suggestion(s: &Suggestion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- SUGGESTION FOR {} ---", s.ticker);
    let _ = writeln!(out, "Current Price: {:.2}", s.current_price);
    let _ = writeln!(out, "Model Confidence (Bullish): {:.2}%", s.confidence * 100.0);
    let _ = writeln!(out, "Market Sentiment: {}", s.sentiment);
    let _ = writeln!(out, "Option Strategy: {}", s.strategy_text());
    out
}
