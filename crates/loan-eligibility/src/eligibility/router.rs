use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::ApplicantInput;
use super::encoder::FEATURE_NAMES;
use super::predictor::Predictor;
use super::service::{EligibilityService, EligibilityServiceError};

/// Router builder exposing the eligibility endpoints.
pub fn eligibility_router<P>(service: Arc<EligibilityService<P>>) -> Router
where
    P: Predictor + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/assessments", post(assess_handler::<P>))
        .route("/api/v1/eligibility/defaults", get(defaults_handler))
        .route("/api/v1/eligibility/schema", get(schema_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<P>(
    State(service): State<Arc<EligibilityService<P>>>,
    payload: Result<Json<ApplicantInput>, JsonRejection>,
) -> Response
where
    P: Predictor + 'static,
{
    let Json(input) = match payload {
        Ok(input) => input,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    match service.assess(&input) {
        Ok(assessment) => (StatusCode::OK, Json(assessment.view())).into_response(),
        Err(EligibilityServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(EligibilityServiceError::Decision(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

/// Fresh form state; clients call this to reset.
pub async fn defaults_handler() -> Json<ApplicantInput> {
    Json(ApplicantInput::default())
}

pub async fn schema_handler() -> Json<serde_json::Value> {
    Json(json!({ "features": FEATURE_NAMES }))
}
