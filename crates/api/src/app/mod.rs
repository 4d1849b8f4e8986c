//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (calendar store, content provider, compliance)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use petpulse_auth::{Hs256JwtValidator, JwtValidator};
use petpulse_infra::{AppConfig, RepositoryError};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, RepositoryError> {
    let services = services::build_services(config).await?;
    let jwt = Arc::new(Hs256JwtValidator::new(config.jwt_secret.as_bytes()));
    Ok(router(services, jwt))
}

/// Router over already-built services and token validator.
pub fn router(services: AppServices, jwt: Arc<dyn JwtValidator>) -> Router {
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
