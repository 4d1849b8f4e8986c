use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use petpulse_auth::Permission;
use petpulse_calendar::{CalendarEventPatch, EventFilters, NewCalendarEvent};

use crate::app::routes::common::{authorized, parse_event_id};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id", get(get_event).patch(update_event).delete(delete_event))
}

/// `tags` is one comma-separated value (`?tags=a,b`); a repeated key is a 400.
pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<EventFilters>, QueryRejection>,
) -> axum::response::Response {
    if let Err(resp) = authorized(&principal, (), Permission::CALENDAR_READ) {
        return resp;
    }
    let Query(filters) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };

    match services.calendar.list_events(principal.user_id(), &filters).await {
        Ok(items) => (StatusCode::OK, Json(dto::EventList { items })).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewCalendarEvent>, JsonRejection>,
) -> axum::response::Response {
    // Permission before decoding: a forbidden caller never learns about body errors.
    let body = match authorized(&principal, body, Permission::CALENDAR_WRITE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let Json(input) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.calendar.create_event(principal.user_id(), input, Utc::now()).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authorized(&principal, (), Permission::CALENDAR_READ) {
        return resp;
    }
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.calendar.get_event(principal.user_id(), id).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<CalendarEventPatch>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, Permission::CALENDAR_WRITE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let Json(patch) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .calendar
        .update_event(principal.user_id(), id, patch, Utc::now())
        .await
    {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authorized(&principal, (), Permission::CALENDAR_WRITE) {
        return resp;
    }
    let id = match parse_event_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.calendar.delete_event(principal.user_id(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
