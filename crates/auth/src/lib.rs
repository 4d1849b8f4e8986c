//! `petpulse-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it decodes
//! bearer tokens into claims and answers permission checks, nothing more.

pub mod authorize;
pub mod claims;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod validator;

pub use authorize::{AuthzError, CommandAuthorization, authorize};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
pub use validator::{Hs256JwtValidator, JwtValidator, TokenError};
