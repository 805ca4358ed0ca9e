// =============================================================================
// Error taxonomy for the /calculate pipeline
// =============================================================================
//
// Every failure in normalisation, coercion, or indicator computation is
// mapped to a single `AnalysisError`.  The HTTP layer turns it into
// `{"error": "<message>"}` with a 400 (bad input), 413 (body over the size
// limit) or 500 (computation) status.  Responses are all-or-nothing: no partial results.
// =============================================================================

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// The payload could not be resolved to a candle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Neither `ohlcv_data` nor `data.attributes.ohlcv_list` is present.
    Unrecognized,
    /// The resolved candle list has no rows.
    Empty,
    /// The body is not valid JSON.
    InvalidJson(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized => write!(f, "Format JSON tidak dikenali"),
            Self::Empty => write!(f, "Data kosong"),
            Self::InvalidJson(detail) => write!(f, "Format JSON tidak dikenali: {detail}"),
        }
    }
}

impl std::error::Error for FormatError {}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The request body could not be read (e.g. it exceeds the size limit).
    BodyRejected { status: StatusCode, detail: String },
    Format(FormatError),
    /// Fewer candles than the longest indicator look-back needs.
    InsufficientData { required: usize, available: usize },
    /// A row failed schema validation (wrong arity or non-numeric cell).
    InvalidRow { index: usize, reason: String },
    /// The indicator arithmetic produced no usable value.
    Computation(String),
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BodyRejected { status, .. } => *status,
            Self::Format(_) | Self::InsufficientData { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidRow { .. } | Self::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `true` for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BodyRejected { detail, .. } => write!(f, "Body permintaan ditolak: {detail}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::InsufficientData { required, available } => write!(
                f,
                "Data tidak cukup: dibutuhkan minimal {required} candle, diterima {available}"
            ),
            Self::InvalidRow { index, reason } => write!(f, "Baris {index} tidak valid: {reason}"),
            Self::Computation(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for AnalysisError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<BytesRejection> for AnalysisError {
    fn from(rejection: BytesRejection) -> Self {
        Self::BodyRejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
