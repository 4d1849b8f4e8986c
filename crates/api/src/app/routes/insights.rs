use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use petpulse_auth::Permission;
use petpulse_calendar::EventFilters;

use crate::app::routes::common::authorized;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/insights", get(get_insights))
}

/// `CalendarioInsights` for the caller.
///
/// Accepts the same filters as the event list (pagination is ignored) and an
/// optional `data_referencia`; otherwise "today" is the current UTC date.
pub async fn get_insights(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    filters: Result<Query<EventFilters>, QueryRejection>,
    reference: Result<Query<dto::ReferenceDateQuery>, QueryRejection>,
) -> axum::response::Response {
    if let Err(resp) = authorized(&principal, (), Permission::CALENDAR_READ) {
        return resp;
    }
    let (Query(filters), Query(reference)) = match (filters, reference) {
        (Ok(f), Ok(r)) => (f, r),
        (Err(e), _) | (_, Err(e)) => return errors::query_rejection(e),
    };
    let today = reference.data_referencia.unwrap_or_else(|| Utc::now().date_naive());

    match services.calendar.insights(principal.user_id(), &filters, today).await {
        Ok(insights) => (StatusCode::OK, Json(insights)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
