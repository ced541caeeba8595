use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use loan_eligibility::eligibility::router::{defaults_handler, schema_handler};
use loan_eligibility::eligibility::{eligibility_router, EligibilityService, LinearPipeline};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Eligibility endpoints plus probes. Without a service, assessments answer 503.
pub(crate) fn with_eligibility_routes(
    service: Option<Arc<EligibilityService<LinearPipeline>>>,
) -> Router {
    let router = match service {
        Some(service) => eligibility_router(service),
        None => Router::new()
            .route("/api/v1/eligibility/assessments", post(model_unavailable))
            .route("/api/v1/eligibility/defaults", get(defaults_handler))
            .route("/api/v1/eligibility/schema", get(schema_handler)),
    };

    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if let Some(error) = &state.model_error {
        let payload = json!({ "status": "model_unavailable", "error": &**error });
        return (StatusCode::SERVICE_UNAVAILABLE, Json(payload));
    }

    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn model_unavailable(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let detail = state
        .model_error
        .as_deref()
        .unwrap_or("model artifact not loaded");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": detail })),
    )
}
