use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::authz::permissions_from_roles;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": principal.user_id().to_string(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "permissions": permissions_from_roles(principal.roles())
            .iter()
            .map(|p| p.as_str().to_string())
            .collect::<Vec<_>>(),
    }))
}
