use thiserror::Error;

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Operation-side authorization contract.
///
/// Implement this on operations that require permissions; the API layer
/// checks them before touching any service.
pub trait CommandAuthorization {
    fn required_permissions(&self) -> &[Permission];
}

/// Check a single permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        tracing::debug!(user_id = %principal.user_id, permission = %required.as_str(), "permission denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use petpulse_core::UserId;

    fn principal(permissions: Vec<Permission>) -> Principal {
        Principal::new(UserId::new(), vec![Role::MARKETING], permissions)
    }

    #[test]
    fn explicit_permission_is_granted() {
        let p = principal(vec![Permission::CALENDAR_READ]);
        assert!(authorize(&p, &Permission::CALENDAR_READ).is_ok());
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal(vec![Permission::WILDCARD]);
        assert!(authorize(&p, &Permission::CONTENT_GENERATE).is_ok());
        assert!(authorize(&p, &Permission::new("anything.else")).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let p = principal(vec![Permission::CALENDAR_READ]);
        assert_eq!(
            authorize(&p, &Permission::CALENDAR_WRITE),
            Err(AuthzError::Forbidden("calendar.write".to_string()))
        );
    }

    #[test]
    fn empty_permission_set_denies() {
        let p = principal(vec![]);
        assert!(authorize(&p, &Permission::CALENDAR_READ).is_err());
    }
}
