use axum::{Router, routing::get};

pub mod calendar;
pub mod common;
pub mod content;
pub mod insights;
pub mod system;

/// Router for all authenticated (owner-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest(
            "/calendar",
            calendar::router()
                .merge(insights::router())
                .merge(content::event_content_router()),
        )
        .nest("/content", content::router())
}
