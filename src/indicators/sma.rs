// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Trailing arithmetic mean over a fixed window.  Used on the volume column to
// measure whether the latest candle traded above its recent average.
// =============================================================================

use super::align_to_rows;

/// Compute the rolling SMA of `values` over `period`.
///
/// Output element `i` is the mean of `values[i..i + period]`, so the series
/// starts at row index `period - 1`.  Returns an empty vec when `period == 0`
/// or there are fewer than `period` values.
///
/// Every window is summed independently, so rounding from a value never
/// outlives the window that holds it.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    values
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period_f)
        .map_while(|mean| mean.is_finite().then_some(mean))
        .collect()
}

/// SMA column aligned one-to-one with `values`; warm-up rows are `None`.
pub fn sma_column(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let series = calculate_sma(values, period);
    align_to_rows(series, values.len(), period.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_guards() {
        assert!(calculate_sma(&[], 3).is_empty());
        assert!(calculate_sma(&[1.0, 2.0], 0).is_empty());
        assert!(calculate_sma(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn sma_known_values() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma.len(), 3);
        assert!((sma[0] - 2.0).abs() < 1e-12);
        assert!((sma[1] - 3.0).abs() < 1e-12);
        assert!((sma[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_matches_naive_window_mean() {
        let values: Vec<f64> = (0..60).map(|i| ((i * 37) % 11) as f64 * 10.5).collect();
        let sma = calculate_sma(&values, 20);
        for (i, got) in sma.iter().enumerate() {
            let naive = values[i..i + 20].iter().sum::<f64>() / 20.0;
            assert!((got - naive).abs() < 1e-9, "index {i}: {got} vs {naive}");
        }
    }

    #[test]
    fn outlier_leaving_the_window_does_not_linger() {
        let mut values = vec![1.0; 200];
        values[0] = 1e17;
        let last = *calculate_sma(&values, 20).last().unwrap();
        assert_eq!(last, 1.0);
    }

    #[test]
    fn last_window_is_exact_after_large_early_volume() {
        let mut values = vec![0.13; 200];
        values[0] = 3.3e9;
        let last = *calculate_sma(&values, 20).last().unwrap();
        let direct = values[180..].iter().sum::<f64>() / 20.0;
        assert_eq!(last, direct);
    }

    #[test]
    fn sma_column_leading_none() {
        let col = sma_column(&[5.0; 25], 20);
        assert_eq!(col.len(), 25);
        assert!(col[..19].iter().all(Option::is_none));
        assert_eq!(col[19], Some(5.0));
    }
}
