use petpulse_core::UserId;

use crate::{Permission, Role};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from storage and transport: the API derives the
/// permission set from token roles through its own policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: UserId, roles: Vec<Role>, permissions: Vec<Permission>) -> Self {
        Self {
            user_id,
            roles,
            permissions,
        }
    }
}
