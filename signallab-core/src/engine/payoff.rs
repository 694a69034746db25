//! Leveraged payoff approximation.
//!
//! A linear stand-in for option convexity: the fraction of capital put at
//! risk is multiplied by the underlying's fractional move and a fixed
//! leverage factor. Losses are capped at the risk amount (the premium paid),
//! gains are not.

use serde::{Deserialize, Serialize};

use crate::domain::{PricePoint, TradeType};
use crate::error::EngineError;

/// Fraction of current capital risked on each trade.
pub const RISK_FRACTION: f64 = 0.02;

/// Percent move (×100) times a 5× option multiplier.
pub const LEVERAGE_FACTOR: f64 = 500.0;

/// Payoff parameters. `Default` gives the fixed engine constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffModel {
    pub risk_fraction: f64,
    pub leverage_factor: f64,
}

impl Default for PayoffModel {
    fn default() -> Self {
        Self {
            risk_fraction: RISK_FRACTION,
            leverage_factor: LEVERAGE_FACTOR,
        }
    }
}

impl PayoffModel {
    /// Capital exposed on a trade sized from `capital_at_risk`.
    pub fn risk_amount(&self, capital_at_risk: f64) -> f64 {
        self.risk_fraction * capital_at_risk
    }

    /// Signed P&L of holding `trade_type` from `current` to `next`.
    ///
    /// `capital_at_risk` is the ledger balance before this trade is applied.
    /// Both closes must be positive and finite.
    pub fn simulate(
        &self,
        trade_type: TradeType,
        current: &PricePoint,
        next: &PricePoint,
        capital_at_risk: f64,
    ) -> Result<f64, EngineError> {
        for point in [current, next] {
            if !point.is_valid() {
                return Err(EngineError::InvalidPrice {
                    date: point.date,
                    close: point.close,
                });
            }
        }

        let change = fractional_change(trade_type, current.close, next.close);
        let risk = self.risk_amount(capital_at_risk);
        let pnl = risk * change * self.leverage_factor;

        Ok(if pnl < -risk { -risk } else { pnl })
    }
}

/// Move in the trade's favour as a fraction of `current`.
///
/// Puts invert the sign so a falling price is a positive change.
pub fn fractional_change(trade_type: TradeType, current: f64, next: f64) -> f64 {
    match trade_type {
        TradeType::Call => (next - current) / current,
        TradeType::Put => (current - next) / current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pt(day: u32, close: f64) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap(), close)
    }

    #[test]
    fn call_gain_scales_with_leverage() {
        let pnl = PayoffModel::default()
            .simulate(TradeType::Call, &pt(1, 100.0), &pt(2, 102.0), 100_000.0)
            .unwrap();
        assert!((pnl - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn put_gains_on_falling_price() {
        let pnl = PayoffModel::default()
            .simulate(TradeType::Put, &pt(1, 102.0), &pt(2, 96.0), 120_000.0)
            .unwrap();
        let expected = 2_400.0 * (6.0 / 102.0) * 500.0;
        assert!((pnl - expected).abs() < 1e-6);
    }

    #[test]
    fn loss_is_capped_at_risk_amount() {
        let pnl = PayoffModel::default()
            .simulate(TradeType::Call, &pt(1, 100.0), &pt(2, 95.0), 100_000.0)
            .unwrap();
        assert_eq!(pnl, -2_000.0);
    }

    #[test]
    fn small_loss_is_not_clamped() {
        // -0.1% move → 2000 × -0.001 × 500 = -1000, inside the cap.
        let pnl = PayoffModel::default()
            .simulate(TradeType::Call, &pt(1, 1000.0), &pt(2, 999.0), 100_000.0)
            .unwrap();
        assert!((pnl + 1_000.0).abs() < 1e-6);
    }

    #[test]
    fn unchanged_price_is_zero_pnl() {
        let pnl = PayoffModel::default()
            .simulate(TradeType::Put, &pt(1, 50.0), &pt(2, 50.0), 100_000.0)
            .unwrap();
        assert_eq!(pnl, 0.0);
    }

    #[test]
    fn non_positive_close_is_rejected() {
        let err = PayoffModel::default()
            .simulate(TradeType::Call, &pt(1, 0.0), &pt(2, 10.0), 100_000.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPrice { close, .. } if close == 0.0));

        let err = PayoffModel::default()
            .simulate(TradeType::Put, &pt(1, 10.0), &pt(2, -1.0), 100_000.0)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPrice { close, .. } if close == -1.0));
    }

    #[test]
    fn fractional_change_signs() {
        assert!((fractional_change(TradeType::Call, 100.0, 110.0) - 0.1).abs() < 1e-12);
        assert!((fractional_change(TradeType::Put, 100.0, 110.0) + 0.1).abs() < 1e-12);
    }
}
