// =============================================================================
// Signals Module
// =============================================================================
//
// Fixed-threshold hints handed to the downstream decision process:
// - Trend (close vs. slow EMA)
// - Momentum (RSI overbought / oversold)
// - Volume status (last volume vs. its moving average)

pub mod classifier;

pub use classifier::{Classification, MomentumStatus, TrendStatus, VolumeStatus};
