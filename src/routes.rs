// astro-report-service/src/routes.rs

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ReportError;
use crate::reports::{create_report, ReportContext};

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<ReportContext>,
}

pub fn router(ctx: ReportContext) -> Router {
    Router::new()
        .route("/api/reports/:kind", post(generate_report))
        .route("/healthz", get(healthz))
        .with_state(AppState { ctx: Arc::new(ctx) })
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// One report request end to end: resolve the assembler, run its
/// pipeline, stream the PDF back as an attachment. The body extractor
/// rejection is folded into the crate error type so malformed JSON gets
/// the same `{error, error_type}` body as every other failure.
async fn generate_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ReportError> {
    let Json(body) = body.map_err(|e| ReportError::InvalidBody(e.body_text()))?;
    let request_id = Uuid::new_v4();
    info!(%request_id, report = %kind, "report requested");

    let report = create_report(&kind)?;
    let output = match report.assemble(&state.ctx, &body).await {
        Ok(output) => output,
        Err(e) => {
            error!(%request_id, report = %kind, error = %e, "report assembly failed");
            return Err(e);
        }
    };

    info!(
        %request_id,
        report = %kind,
        filename = %output.filename,
        size_bytes = output.bytes.len(),
        "report delivered"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", output.filename),
        )
        .body(Body::from(output.bytes))
        .map_err(|e| ReportError::HttpClient(e.to_string()))
}
