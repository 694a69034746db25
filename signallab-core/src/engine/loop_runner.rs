//! Run orchestrator: one sequential pass over the aligned series.

use tracing::{debug, info, warn};

use super::aggregate::{aggregate, BacktestResult};
use super::ledger::CapitalLedger;
use super::state::EngineConfig;
use crate::domain::PricePoint;
use crate::error::EngineError;
use crate::signals::classify;

/// Run a backtest over `prices` driven by `confidences`.
///
/// `confidences[i]` decides whether to trade from `prices[i]` to
/// `prices[i + 1]`. The series may be as long as `prices` (its last value is
/// then never evaluated) or one shorter.
pub fn run_backtest(
    prices: &[PricePoint],
    confidences: &[f64],
    config: &EngineConfig,
) -> Result<BacktestResult, EngineError> {
    validate_inputs(prices, confidences)?;
    config.validate()?;

    if !config.has_dead_zone() {
        warn!(
            threshold = config.threshold,
            "threshold <= 0.5: no dead zone, every score trades"
        );
    }

    info!(
        steps = prices.len() - 1,
        threshold = config.threshold,
        initial_capital = config.initial_capital,
        "starting backtest"
    );

    let ledger = prices
        .windows(2)
        .zip(confidences)
        .try_fold(
            CapitalLedger::new(config.initial_capital),
            |ledger, (pair, &confidence)| -> Result<CapitalLedger, EngineError> {
                let (current, next) = (&pair[0], &pair[1]);
                let intent = classify(confidence, config.threshold);
                let Some(trade_type) = intent.trade_type() else {
                    return Ok(ledger);
                };

                let pnl = config
                    .payoff
                    .simulate(trade_type, current, next, ledger.capital())?;
                debug!(
                    date = %current.date,
                    %trade_type,
                    confidence,
                    pnl,
                    capital_at_risk = ledger.capital(),
                    "trade"
                );
                Ok(ledger.apply_step(current.date, intent, confidence, pnl))
            },
        )?;

    let result = aggregate(ledger.into_records(), config.initial_capital);
    info!(
        trades = result.total_trades,
        win_rate = result.win_rate,
        final_capital = result.final_capital,
        "backtest complete"
    );
    Ok(result)
}

fn validate_inputs(prices: &[PricePoint], confidences: &[f64]) -> Result<(), EngineError> {
    if prices.len() < 2 {
        return Err(EngineError::invalid_input(format!(
            "need at least 2 price points, got {}",
            prices.len()
        )));
    }
    if confidences.is_empty() {
        return Err(EngineError::invalid_input("confidence series is empty"));
    }
    let n = prices.len();
    if confidences.len() != n && confidences.len() != n - 1 {
        return Err(EngineError::invalid_input(format!(
            "confidence series length {} does not match {} price points (expected {} or {})",
            confidences.len(),
            n,
            n - 1,
            n
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prices(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn rejects_single_price() {
        let err = run_backtest(&prices(&[100.0]), &[0.7], &EngineConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_empty_confidences() {
        let err =
            run_backtest(&prices(&[100.0, 101.0]), &[], &EngineConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let p = prices(&[100.0, 101.0, 102.0, 103.0]);
        assert!(run_backtest(&p, &[0.7, 0.7], &EngineConfig::default()).is_err());
        assert!(run_backtest(&p, &[0.7; 5], &EngineConfig::default()).is_err());
        assert!(run_backtest(&p, &[0.7; 3], &EngineConfig::default()).is_ok());
        assert!(run_backtest(&p, &[0.7; 4], &EngineConfig::default()).is_ok());
    }

    #[test]
    fn last_confidence_is_never_evaluated() {
        let p = prices(&[100.0, 101.0]);
        let result = run_backtest(&p, &[0.5, 0.99], &EngineConfig::default()).unwrap();
        assert_eq!(result.total_trades, 0);
    }

    #[test]
    fn invalid_price_on_trading_step_fails_the_run() {
        let p = prices(&[100.0, 0.0, 102.0]);
        let err = run_backtest(&p, &[0.7, 0.7], &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPrice { close, .. } if close == 0.0));
    }

    #[test]
    fn invalid_config_fails_before_the_loop() {
        let p = prices(&[100.0, 101.0]);
        let err = run_backtest(&p, &[0.7], &EngineConfig::new(1.2, 100_000.0)).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
