// =============================================================================
// Indicator Snapshot — last-row values over a full candle series
// =============================================================================
//
// Every indicator is computed over the whole ordered series (so warm-up and
// smoothing see all history), aligned to the candle rows, and then only the
// final row is read back.
//
//   RSI   — Wilder's smoothing, SMA-seeded         (rsi.rs)
//   EMA   — 2 / (n + 1) weighting, SMA-seeded      (ema.rs)
//   SMA   — trailing window mean on volume         (sma.rs)
// =============================================================================

use super::{ema::ema_column, rsi::rsi_column, sma::sma_column};
use crate::error::AnalysisError;
use crate::market_data::CandleSeries;

/// Look-back lengths for every reported indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub volume_sma: usize,
}

impl IndicatorPeriods {
    /// RSI(14), EMA(20/50/200), volume SMA(20).
    pub const STANDARD: Self = Self {
        rsi: 14,
        ema_fast: 20,
        ema_mid: 50,
        ema_slow: 200,
        volume_sma: 20,
    };

    /// Rows needed before every indicator is defined on the final row.
    ///
    /// RSI needs one more row than its period (it works on deltas).
    pub fn required_rows(&self) -> usize {
        [
            self.rsi + 1,
            self.ema_fast,
            self.ema_mid,
            self.ema_slow,
            self.volume_sma,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Indicator values at the most recent candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub volume: f64,
    pub rsi: f64,
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub volume_sma: f64,
}

impl IndicatorSnapshot {
    /// Compute all indicators over `series` and extract the last row.
    ///
    /// Fails with `InsufficientData` when the series is shorter than the
    /// longest look-back, and with `Computation` when an indicator is still
    /// undefined on the last row (non-finite arithmetic cut its series short).
    pub fn compute(series: &CandleSeries, periods: &IndicatorPeriods) -> Result<Self, AnalysisError> {
        let required = periods.required_rows();
        if series.len() < required {
            return Err(AnalysisError::InsufficientData {
                required,
                available: series.len(),
            });
        }

        let last = series
            .last()
            .ok_or_else(|| AnalysisError::Computation("seri candle kosong".to_string()))?;

        let closes = series.closes();
        let volumes = series.volumes();

        let rsi = rsi_column(&closes, periods.rsi);
        let ema_fast = ema_column(&closes, periods.ema_fast);
        let ema_mid = ema_column(&closes, periods.ema_mid);
        let ema_slow = ema_column(&closes, periods.ema_slow);
        let volume_sma = sma_column(&volumes, periods.volume_sma);

        Ok(Self {
            close: last.close,
            volume: last.volume,
            rsi: last_defined(&rsi, "RSI")?,
            ema_fast: last_defined(&ema_fast, "EMA_FAST")?,
            ema_mid: last_defined(&ema_mid, "EMA_MID")?,
            ema_slow: last_defined(&ema_slow, "EMA_SLOW")?,
            volume_sma: last_defined(&volume_sma, "VOL_SMA")?,
        })
    }
}

fn last_defined(column: &[Option<f64>], name: &str) -> Result<f64, AnalysisError> {
    column
        .last()
        .copied()
        .flatten()
        .ok_or_else(|| AnalysisError::Computation(format!("{name} tidak terdefinisi pada candle terakhir")))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{ema::calculate_ema, rsi::calculate_rsi, sma::calculate_sma};
    use crate::market_data::RawRow;

    fn series_from_closes(closes: &[f64]) -> CandleSeries {
        let rows: Vec<RawRow> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| [i as f64, c, c, c, c, 100.0 + i as f64])
            .collect();
        CandleSeries::from_rows(rows)
    }

    #[test]
    fn standard_periods_need_two_hundred_rows() {
        assert_eq!(IndicatorPeriods::STANDARD.required_rows(), 200);
        assert_eq!(IndicatorPeriods::default(), IndicatorPeriods::STANDARD);
    }

    #[test]
    fn rsi_dominates_required_rows_when_emas_are_short() {
        let periods = IndicatorPeriods { rsi: 14, ema_fast: 3, ema_mid: 5, ema_slow: 10, volume_sma: 5 };
        assert_eq!(periods.required_rows(), 15);
    }

    #[test]
    fn short_series_is_insufficient() {
        let series = series_from_closes(&[1.0; 199]);
        let err = IndicatorSnapshot::compute(&series, &IndicatorPeriods::STANDARD).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { required: 200, available: 199 });
    }

    #[test]
    fn exactly_required_rows_is_enough() {
        let series = series_from_closes(&[5.0; 200]);
        let snap = IndicatorSnapshot::compute(&series, &IndicatorPeriods::STANDARD).unwrap();
        assert!((snap.ema_slow - 5.0).abs() < 1e-9);
        assert!((snap.rsi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_matches_last_values_of_each_indicator() {
        let closes: Vec<f64> = (0..260).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1).collect();
        let series = series_from_closes(&closes);
        let snap = IndicatorSnapshot::compute(&series, &IndicatorPeriods::STANDARD).unwrap();

        let volumes = series.volumes();
        assert_eq!(snap.close, *closes.last().unwrap());
        assert_eq!(snap.volume, *volumes.last().unwrap());
        assert_eq!(snap.rsi, *calculate_rsi(&closes, 14).last().unwrap());
        assert_eq!(snap.ema_fast, *calculate_ema(&closes, 20).last().unwrap());
        assert_eq!(snap.ema_mid, *calculate_ema(&closes, 50).last().unwrap());
        assert_eq!(snap.ema_slow, *calculate_ema(&closes, 200).last().unwrap());
        assert_eq!(snap.volume_sma, *calculate_sma(&volumes, 20).last().unwrap());
    }

    #[test]
    fn non_finite_arithmetic_is_a_computation_error() {
        // Sums overflow to infinity, so the EMA seed is non-finite.
        let mut closes = vec![f64::MAX; 200];
        closes[0] = 1.0;
        let series = series_from_closes(&closes);
        let err = IndicatorSnapshot::compute(&series, &IndicatorPeriods::STANDARD).unwrap_err();
        assert!(matches!(err, AnalysisError::Computation(_)), "{err:?}");
    }
}
