// =============================================================================
// Payload normaliser — resolves the two accepted request shapes
// =============================================================================
//
// Shape A (flat):    { "ohlcv_data": [[t, o, h, l, c, v], ...] }
// Shape B (nested):  { "data": { "attributes": { "ohlcv_list": [[...], ...] } } }
//
// Shape A is tried first.  Rows are validated here, before any series is
// built: each must be a 6-element array of numbers or numeric strings.
// =============================================================================

use serde_json::Value;

use crate::error::{AnalysisError, FormatError};

/// JSON pointer to the candle list inside the nested provider format.
const NESTED_LIST_POINTER: &str = "/data/attributes/ohlcv_list";

const COLUMN_NAMES: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// One validated row: `[timestamp, open, high, low, close, volume]`.
pub type RawRow = [f64; 6];

/// A request body resolved to one of the accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum OhlcvPayload {
    Flat(Vec<Value>),
    Nested(Vec<Value>),
}

impl OhlcvPayload {
    /// Parse raw request bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| FormatError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Resolve an already-parsed JSON body.
    pub fn from_value(mut value: Value) -> Result<Self, FormatError> {
        if !value.is_object() {
            return Err(FormatError::Unrecognized);
        }

        let payload = if let Some(Value::Array(rows)) = value.get_mut("ohlcv_data").map(Value::take) {
            Self::Flat(rows)
        } else if let Some(Value::Array(rows)) = value.pointer_mut(NESTED_LIST_POINTER).map(Value::take) {
            Self::Nested(rows)
        } else {
            return Err(FormatError::Unrecognized);
        };

        if payload.rows().is_empty() {
            return Err(FormatError::Empty);
        }
        Ok(payload)
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Self::Flat(_) => "ohlcv_data",
            Self::Nested(_) => "data.attributes.ohlcv_list",
        }
    }

    pub fn rows(&self) -> &[Value] {
        match self {
            Self::Flat(rows) | Self::Nested(rows) => rows,
        }
    }

    /// Validate every row and coerce it to numbers.
    pub fn into_rows(self) -> Result<Vec<RawRow>, AnalysisError> {
        self.rows()
            .iter()
            .enumerate()
            .map(|(index, row)| parse_row(index, row))
            .collect()
    }
}

fn parse_row(index: usize, row: &Value) -> Result<RawRow, AnalysisError> {
    let invalid = |reason: String| AnalysisError::InvalidRow { index, reason };

    let cells = row
        .as_array()
        .ok_or_else(|| invalid("baris harus berupa array".to_string()))?;
    if cells.len() != COLUMN_NAMES.len() {
        return Err(invalid(format!(
            "dibutuhkan {} kolom, diterima {}",
            COLUMN_NAMES.len(),
            cells.len()
        )));
    }

    let mut out = [0.0_f64; 6];
    for ((slot, cell), name) in out.iter_mut().zip(cells).zip(COLUMN_NAMES) {
        *slot = coerce_number(cell)
            .ok_or_else(|| invalid(format!("kolom {name} bukan angka ({cell})")))?;
    }
    Ok(out)
}

/// Accept JSON numbers and numeric strings; reject anything non-finite.
fn coerce_number(cell: &Value) -> Option<f64> {
    let n = match cell {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
