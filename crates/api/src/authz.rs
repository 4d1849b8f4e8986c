//! API-side authorization guard.
//!
//! Enforced at the operation boundary (before a service is called), keeping
//! the calendar engine and infra auth-agnostic.

use petpulse_auth::{AuthzError, CommandAuthorization, Permission, Principal, Role, authorize};

use crate::context::PrincipalContext;

/// Check authorization for an operation in the current request context.
pub fn authorize_command<C: CommandAuthorization>(
    principal: &PrincipalContext,
    command: &C,
) -> Result<(), AuthzError> {
    let principal = Principal::new(
        principal.user_id(),
        principal.roles().to_vec(),
        permissions_from_roles(principal.roles()),
    );

    for perm in command.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}

/// Static role→permission policy.
///
/// Unknown roles grant nothing.
pub fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    let mut perms: Vec<Permission> = Vec::new();
    for role in roles {
        let granted: Vec<Permission> = if *role == Role::ADMIN {
            vec![Permission::WILDCARD]
        } else if *role == Role::MARKETING {
            vec![
                Permission::CALENDAR_READ,
                Permission::CALENDAR_WRITE,
                Permission::CONTENT_GENERATE,
            ]
        } else if *role == Role::VIEWER {
            vec![Permission::CALENDAR_READ]
        } else {
            Vec::new()
        };
        for p in granted {
            if !perms.contains(&p) {
                perms.push(p);
            }
        }
    }
    perms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::routes::common::CmdAuth;
    use petpulse_core::UserId;

    fn ctx(roles: &[Role]) -> PrincipalContext {
        PrincipalContext::new(UserId::new(), roles.to_vec())
    }

    fn needs(perm: Permission) -> CmdAuth<()> {
        CmdAuth {
            inner: (),
            required: vec![perm],
        }
    }

    #[test]
    fn admin_gets_wildcard() {
        assert_eq!(permissions_from_roles(&[Role::ADMIN]), vec![Permission::WILDCARD]);
        assert!(authorize_command(&ctx(&[Role::ADMIN]), &needs(Permission::CONTENT_GENERATE)).is_ok());
    }

    #[test]
    fn viewer_can_only_read() {
        let viewer = ctx(&[Role::VIEWER]);
        assert!(authorize_command(&viewer, &needs(Permission::CALENDAR_READ)).is_ok());
        assert!(authorize_command(&viewer, &needs(Permission::CALENDAR_WRITE)).is_err());
        assert!(authorize_command(&viewer, &needs(Permission::CONTENT_GENERATE)).is_err());
    }

    #[test]
    fn roles_merge_without_duplicates() {
        let perms = permissions_from_roles(&[Role::VIEWER, Role::MARKETING]);
        assert_eq!(perms.len(), 3);
    }

    #[test]
    fn token_role_names_resolve_to_role_constants() {
        assert_eq!(
            permissions_from_roles(&[Role::new(Role::VIEWER.as_str().to_string())]),
            vec![Permission::CALENDAR_READ]
        );
        assert!(permissions_from_roles(&[Role::new("Admin")]).is_empty());
    }

    #[test]
    fn unknown_role_grants_nothing() {
        assert!(permissions_from_roles(&[Role::new("intern")]).is_empty());
        assert!(authorize_command(&ctx(&[Role::new("intern")]), &needs(Permission::CALENDAR_READ)).is_err());
    }
}
