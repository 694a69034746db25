//! Signal layer: confidence scores → trade intents.
//!
//! The classifier is portfolio-agnostic: it sees one confidence value and the
//! threshold, never capital or prior trades.

pub mod intent;
pub mod suggestion;

pub use intent::{classify, TradeIntent, DEFAULT_THRESHOLD};
pub use suggestion::{suggest, Action, Sentiment, Suggestion};
