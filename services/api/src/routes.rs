use crate::infra::{deserialize_optional_date, evaluation_instant, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use nourish_ai::analytics::{
    AnalysisReport, AnalyticsConfig, CsvLogImporter, HouseholdProfile, InventoryItem, LogRecord,
    RawInventoryItem, RawLogRecord,
};
use nourish_ai::error::AppError;
use nourish_ai::insights::{GeneratedInsights, InsightService, NullLanguageModel};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisRequest {
    #[serde(default)]
    pub(crate) logs: Vec<RawLogRecord>,
    #[serde(default)]
    pub(crate) inventory: Vec<RawInventoryItem>,
    #[serde(default)]
    pub(crate) profile: HouseholdProfile,
    /// Evaluation date; defaults to the server's current day.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    /// Optional CSV log export, merged after the JSON logs.
    #[serde(default)]
    pub(crate) logs_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalysisResponse {
    pub(crate) today: NaiveDate,
    #[serde(flatten)]
    pub(crate) report: AnalysisReport,
    pub(crate) insights: GeneratedInsights,
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/analysis/report", post(analysis_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Analyze one snapshot of logs, inventory, and profile data. No language
/// model is wired into the service yet, so insights always come from the
/// deterministic fallback.
pub(crate) async fn analysis_report_endpoint(
    Json(payload): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let AnalysisRequest {
        logs,
        inventory,
        profile,
        today,
        logs_csv,
    } = payload;

    let mut logs: Vec<LogRecord> = logs.into_iter().map(RawLogRecord::normalize).collect();
    if let Some(export) = logs_csv {
        logs.extend(CsvLogImporter::from_reader(Cursor::new(
            export.into_bytes(),
        ))?);
    }
    let inventory: Vec<InventoryItem> = inventory
        .into_iter()
        .map(RawInventoryItem::normalize)
        .collect();

    let now = evaluation_instant(today);
    let config = AnalyticsConfig::standard();
    let report = AnalysisReport::build(&profile, &logs, &inventory, &config, now);
    let insights = InsightService::new(NullLanguageModel).generate(&profile, &report);

    Ok(Json(AnalysisResponse {
        today: now.date_naive(),
        report,
        insights,
    }))
}
