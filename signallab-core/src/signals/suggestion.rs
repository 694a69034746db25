//! Next-session suggestion from the latest confidence score.
//!
//! Reuses the classifier, so the suggestion for today's score is exactly the
//! trade the backtest would have taken on it. No option chain is consulted;
//! the strike is quoted as "near" the current price.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::intent::{classify, TradeIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Bullish => "BULLISH",
            Sentiment::Bearish => "BEARISH",
            Sentiment::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    BuyCall,
    BuyPut,
    Wait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub ticker: String,
    pub confidence: f64,
    pub current_price: f64,
    pub sentiment: Sentiment,
    pub action: Action,
}

impl Suggestion {
    /// One-line strategy text, e.g. `BUY NIFTY CE (Call Option) near 22000.50 Strike`.
    pub fn strategy_text(&self) -> String {
        match self.action {
            Action::BuyCall => format!(
                "BUY {} CE (Call Option) near {:.2} Strike",
                self.ticker, self.current_price
            ),
            Action::BuyPut => format!(
                "BUY {} PE (Put Option) near {:.2} Strike",
                self.ticker, self.current_price
            ),
            Action::Wait => "WAIT".to_string(),
        }
    }
}

/// Build the suggestion for the most recent confidence score.
pub fn suggest(ticker: &str, confidence: f64, current_price: f64, threshold: f64) -> Suggestion {
    let (sentiment, action) = match classify(confidence, threshold) {
        TradeIntent::Call => (Sentiment::Bullish, Action::BuyCall),
        TradeIntent::Put => (Sentiment::Bearish, Action::BuyPut),
        TradeIntent::NoTrade => (Sentiment::Neutral, Action::Wait),
    };
    Suggestion {
        ticker: ticker.to_string(),
        confidence,
        current_price,
        sentiment,
        action,
    }
}
