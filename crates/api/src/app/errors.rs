use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use petpulse_ai::AiError;
use petpulse_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "calendar event not found"),
        ServiceError::StoreUnavailable(msg) => {
            tracing::error!(error = %msg, "calendar store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
    }
}

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    match err {
        AiError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        AiError::InferenceFailed(msg) => {
            tracing::warn!(error = %msg, "content provider failed");
            json_error(StatusCode::BAD_GATEWAY, "ai_provider_error", msg)
        }
    }
}

pub fn query_rejection(err: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
}

pub fn json_rejection(err: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
