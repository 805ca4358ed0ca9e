// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the service
// reports.  The `calculate_*` functions return only the defined portion of a
// series; the `*_column` variants pad the warm-up rows with `None` so every
// column lines up with the candle rows it was computed from.

pub mod ema;
pub mod rsi;
pub mod sma;
pub mod snapshot;

pub use snapshot::{IndicatorPeriods, IndicatorSnapshot};

/// Place a trimmed indicator `series` into a column of `rows` entries whose
/// first defined value sits at `first_index`.
///
/// A series that was cut short (non-finite arithmetic) leaves the trailing
/// rows undefined as well.
pub(crate) fn align_to_rows(series: Vec<f64>, rows: usize, first_index: usize) -> Vec<Option<f64>> {
    let mut column = vec![None; rows];
    for (slot, value) in column.iter_mut().skip(first_index).zip(series) {
        *slot = Some(value);
    }
    column
}
