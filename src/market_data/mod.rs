pub mod candle_series;
pub mod payload;

// Re-exported for convenient access (e.g. `use crate::market_data::CandleSeries`).
pub use candle_series::CandleSeries;
pub use payload::{OhlcvPayload, RawRow};
