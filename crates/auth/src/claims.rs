use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use petpulse_core::UserId;

use crate::Role;

/// JWT claims model (transport-agnostic).
///
/// The minimal set of claims expected once a token has been decoded and its
/// signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user that owns every calendar record touched by the request.
    pub sub: UserId,

    /// RBAC roles granted to the user.
    pub roles: Vec<Role>,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claim time window.
///
/// Signature verification happens in [`crate::validator`]; this only looks at
/// the decoded claims.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, ttl_minutes: i64) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            roles: vec![Role::VIEWER],
            issued_at,
            expires_at: issued_at + Duration::minutes(ttl_minutes),
        }
    }

    #[test]
    fn accepts_token_inside_window() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims(now, 10), now), Ok(()));
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(20), 10);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn rejects_future_token() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(5), 10);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let c = claims(now, -1);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::InvalidTimeWindow));
    }
}
