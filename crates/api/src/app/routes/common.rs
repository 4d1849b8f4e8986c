use petpulse_auth::{CommandAuthorization, Permission};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Small helper wrapper to associate required permissions with an operation.
pub struct CmdAuth<C> {
    pub inner: C,
    pub required: Vec<Permission>,
}

impl<C> CommandAuthorization for CmdAuth<C> {
    fn required_permissions(&self) -> &[Permission] {
        &self.required
    }
}

/// Authorize `inner` for `principal`, turning a denial into a 403 response.
pub fn authorized<C>(
    principal: &PrincipalContext,
    inner: C,
    required: Permission,
) -> Result<C, axum::response::Response> {
    let cmd = CmdAuth {
        inner,
        required: vec![required],
    };
    match crate::authz::authorize_command(principal, &cmd) {
        Ok(()) => Ok(cmd.inner),
        Err(e) => {
            tracing::debug!(user_id = %principal.user_id(), error = %e, "request forbidden");
            Err(errors::json_error(
                axum::http::StatusCode::FORBIDDEN,
                "forbidden",
                e.to_string(),
            ))
        }
    }
}

/// Parse a path id, answering 400 on garbage.
pub fn parse_event_id(raw: &str) -> Result<petpulse_core::CalendarEventId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "validation_error",
            format!("invalid event id '{raw}'"),
        )
    })
}
