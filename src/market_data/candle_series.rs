use super::RawRow;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV candle as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<RawRow> for Candle {
    fn from([timestamp, open, high, low, close, volume]: RawRow) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

// ---------------------------------------------------------------------------
// CandleSeries -- per-request, oldest-first
// ---------------------------------------------------------------------------

/// Candles ordered ascending by timestamp.  Built per request and dropped
/// with the response.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from validated rows.
    ///
    /// The sort is stable: candles sharing a timestamp keep their input order,
    /// so the last of them is treated as the most recent.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut candles: Vec<Candle> = rows.into_iter().map(Candle::from).collect();
        candles.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Most recent candle.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
