// =============================================================================
// Analysis Report — the /calculate response body
// =============================================================================
//
// The full pipeline lives here as `analyze`:
//
//   payload -> validated rows -> ordered series -> indicator snapshot
//           -> classification -> report
//
// Nothing is returned unless every stage succeeds.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::error::AnalysisError;
use crate::indicators::{IndicatorPeriods, IndicatorSnapshot};
use crate::market_data::{CandleSeries, OhlcvPayload};
use crate::signals::{Classification, MomentumStatus, TrendStatus, VolumeStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeReport {
    /// Volume of the most recent candle.
    pub current: f64,
    /// 20-period simple moving average of volume.
    pub average_20: f64,
    pub status: VolumeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalHint {
    pub trend_status: TrendStatus,
    pub momentum_status: MomentumStatus,
}

/// Indicator snapshot plus signal hints for the latest candle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Close of the most recent candle.
    pub price: f64,
    /// RSI(14), rounded to two decimals.
    pub rsi: f64,
    pub ema_20: f64,
    pub ema_50: f64,
    pub ema_200: f64,
    pub volume: VolumeReport,
    pub signal_hint: SignalHint,
}

impl AnalysisReport {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        let classification = Classification::from_snapshot(snapshot);
        Self {
            price: snapshot.close,
            rsi: round_2dp(snapshot.rsi),
            ema_20: snapshot.ema_fast,
            ema_50: snapshot.ema_mid,
            ema_200: snapshot.ema_slow,
            volume: VolumeReport {
                current: snapshot.volume,
                average_20: snapshot.volume_sma,
                status: classification.volume,
            },
            signal_hint: SignalHint {
                trend_status: classification.trend,
                momentum_status: classification.momentum,
            },
        }
    }
}

/// Run the whole pipeline over a resolved payload.
pub fn analyze(payload: OhlcvPayload, periods: &IndicatorPeriods) -> Result<AnalysisReport, AnalysisError> {
    let rows = payload.into_rows()?;
    let series = CandleSeries::from_rows(rows);
    if let Some(latest) = series.last() {
        debug!(
            candles = series.len(),
            timestamp = latest.timestamp,
            open = latest.open,
            high = latest.high,
            low = latest.low,
            close = latest.close,
            volume = latest.volume,
            "latest candle"
        );
    }
    let snapshot = IndicatorSnapshot::compute(&series, periods)?;
    Ok(AnalysisReport::from_snapshot(&snapshot))
}

/// Round half away from zero to two decimal places.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
