//! Trade intent: what a single confidence score asks for.

use serde::{Deserialize, Serialize};

use crate::domain::TradeType;

/// Default decision boundary.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Intent derived from one confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeIntent {
    /// Bullish: buy a call (long proxy).
    Call,

    /// Bearish: buy a put (short proxy).
    Put,

    /// Confidence inside the dead zone.
    NoTrade,
}

impl TradeIntent {
    pub fn is_trade(&self) -> bool {
        !matches!(self, TradeIntent::NoTrade)
    }

    /// The trade type this intent opens, if any.
    pub fn trade_type(&self) -> Option<TradeType> {
        match self {
            TradeIntent::Call => Some(TradeType::Call),
            TradeIntent::Put => Some(TradeType::Put),
            TradeIntent::NoTrade => None,
        }
    }
}

/// Classify a confidence score against `threshold`.
///
/// Both comparisons are strict, so values sitting exactly on `threshold` or
/// `1 - threshold` fall into the dead zone. The call side is tested first;
/// with `threshold <= 0.5` the two regions overlap and the call wins.
/// NaN compares false everywhere and yields `NoTrade`.
pub fn classify(confidence: f64, threshold: f64) -> TradeIntent {
    if confidence > threshold {
        TradeIntent::Call
    } else if confidence < 1.0 - threshold {
        TradeIntent::Put
    } else {
        TradeIntent::NoTrade
    }
}
