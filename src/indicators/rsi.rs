// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// Wilder's definition over close-to-close deltas:
//
//   seed    : avg_gain, avg_loss = mean of the first `period` gains / losses
//   update  : avg = (avg * (period - 1) + x) / period
//   value   : RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//
// avg_loss == 0 gives 100 (only gains), or 50 when avg_gain is 0 as well.
// The first value belongs to row `period`, the first row with `period` deltas
// behind it.
// =============================================================================

use super::align_to_rows;

/// Smoothed gain / loss averages for one RSI run.
#[derive(Debug, Clone, Copy)]
struct WilderAverages {
    gain: f64,
    loss: f64,
    period: f64,
}

impl WilderAverages {
    /// Plain means of the gains and losses in `deltas`.
    fn seed(deltas: &[f64]) -> Self {
        let period = deltas.len() as f64;
        Self {
            gain: deltas.iter().map(|d| d.max(0.0)).sum::<f64>() / period,
            loss: deltas.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period,
            period,
        }
    }

    fn push(&mut self, delta: f64) {
        let keep = self.period - 1.0;
        self.gain = (self.gain * keep + delta.max(0.0)) / self.period;
        self.loss = (self.loss * keep + (-delta).max(0.0)) / self.period;
    }

    fn rsi(&self) -> Option<f64> {
        let value = if self.loss == 0.0 {
            if self.gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            100.0 - 100.0 / (1.0 + self.gain / self.loss)
        };
        value.is_finite().then_some(value)
    }
}

/// RSI series for `closes`, one value per row from index `period` onward.
///
/// Empty when `period == 0` or there are not `period + 1` closes.  A
/// non-finite value ends the series early.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let (seed, rest) = deltas.split_at(period);

    let mut averages = WilderAverages::seed(seed);
    let Some(first) = averages.rsi() else {
        return Vec::new();
    };

    let mut series = Vec::with_capacity(rest.len() + 1);
    series.push(first);
    series.extend(rest.iter().map_while(|&delta| {
        averages.push(delta);
        averages.rsi()
    }));
    series
}

/// RSI column aligned one-to-one with `closes`; warm-up rows are `None`.
pub fn rsi_column(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let series = calculate_rsi(closes, period);
    align_to_rows(series, closes.len(), period)
}
