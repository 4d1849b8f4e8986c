use petpulse_auth::Role;
use petpulse_core::UserId;

/// Principal context for a request (authenticated user + roles).
///
/// Immutable and present on every protected route. The user id is the owner
/// scope for all calendar reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
    roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
