//! Domain types for SignalLab

pub mod ids;
pub mod price;
pub mod trade;

pub use ids::{DatasetHash, RunId};
pub use price::PricePoint;
pub use trade::{TradeRecord, TradeType};
