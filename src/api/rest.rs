// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
//   GET  /           plain-text liveness banner
//   GET  /health     JSON liveness probe
//   POST /calculate  OHLCV candles in, indicator snapshot out
//
// Handlers hold no state at all; every request is computed from its own
// body.  CORS is permissive because the automation pipeline calls
// from arbitrary hosts.
// =============================================================================

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Json},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::indicators::IndicatorPeriods;
use crate::market_data::OhlcvPayload;
use crate::report::{analyze, AnalysisReport};
use crate::service_config::ServiceConfig;

pub const LIVENESS_MESSAGE: &str = "ARION Technical Analysis Service is Running!";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router with CORS, request tracing and a body-size limit.
pub fn router(config: &ServiceConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = config.max_body_bytes;

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/calculate", post(calculate))
        // ── Middleware ──────────────────────────────────────────────
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// =============================================================================
// Liveness
// =============================================================================

async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Calculate
// =============================================================================

async fn calculate(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisReport>, AnalysisError> {
    let request_id = Uuid::new_v4();
    let body = body.map_err(|rejection| {
        let e = AnalysisError::from(rejection);
        warn!(%request_id, error = %e, "calculate body rejected");
        e
    })?;
    let span = info_span!("calculate", %request_id, bytes = body.len());

    span.in_scope(|| {
        let result = OhlcvPayload::from_slice(&body)
            .map_err(AnalysisError::from)
            .and_then(|payload| {
                debug!(shape = payload.shape(), rows = payload.rows().len(), "payload resolved");
                analyze(payload, &IndicatorPeriods::STANDARD)
            });

        match &result {
            Ok(report) => info!(
                price = report.price,
                rsi = report.rsi,
                trend = %report.signal_hint.trend_status,
                momentum = %report.signal_hint.momentum_status,
                volume = %report.volume.status,
                "indicators calculated"
            ),
            Err(e) if e.is_client_error() => warn!(error = %e, "rejected calculate request"),
            Err(e) => error!(error = %e, "calculation failed"),
        }

        result.map(Json)
    })
}
