use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use petpulse_ai::{ContentRequest, ComplianceChecker};
use petpulse_auth::Permission;
use petpulse_calendar::content_angle;

use crate::app::routes::common::{authorized, parse_event_id};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

/// Routes under `/content`. The per-event generation route is mounted by
/// [`event_content_router`] under `/calendar`.
pub fn router() -> Router {
    Router::new().route("/compliance", post(check_compliance))
}

pub fn event_content_router() -> Router {
    Router::new().route("/events/:id/content", post(generate_for_event))
}

/// Draft a post for one of the caller's events and check it.
pub async fn generate_for_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::GenerateContentRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authorized(&principal, (), Permission::CONTENT_GENERATE) {
        return resp;
    }
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    // A request without a JSON body asks for the defaults; a bad body is a 400.
    let options = match body {
        Ok(Json(b)) => b,
        Err(JsonRejection::MissingJsonContentType(_)) => dto::GenerateContentRequest::default(),
        Err(e) => return errors::json_rejection(e),
    };

    let event = match services.calendar.get_event(principal.user_id(), id).await {
        Ok(e) => e,
        Err(e) => return errors::service_error_to_response(e),
    };

    let channel = options.channel.unwrap_or_default();
    let request = ContentRequest::new(
        event.title.clone(),
        event.category.label(),
        content_angle(event.category).angle,
    )
    .with_channel(channel)
    .with_tone(options.tone)
    .with_date_label(event.start_date.format("%d/%m/%Y").to_string());

    let content = match services.content.run(&request) {
        Ok(c) => c,
        Err(e) => return errors::ai_error_to_response(e),
    };

    let compliance = checker_for(&services.compliance, channel.max_chars())
        .check(&content.full_text(), event.category.is_health_related());

    tracing::info!(
        event_id = %event.id,
        provider = %content.provider,
        compliant = compliance.compliant,
        "content draft generated"
    );

    (
        StatusCode::OK,
        Json(dto::GeneratedContentResponse {
            event_id: event.id.to_string(),
            content,
            compliance,
        }),
    )
        .into_response()
}

/// Check arbitrary copy against the compliance rules.
pub async fn check_compliance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::ComplianceCheckRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, Permission::CONTENT_GENERATE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    let checker = match req.channel {
        Some(channel) => checker_for(&services.compliance, channel.max_chars()),
        None => services.compliance.clone(),
    };
    let requires_disclaimer = req.category.is_some_and(|c| c.is_health_related());

    (StatusCode::OK, Json(checker.check(&req.text, requires_disclaimer))).into_response()
}

fn checker_for(base: &ComplianceChecker, max_chars: usize) -> ComplianceChecker {
    base.clone().with_max_chars(max_chars)
}
