//! `petpulse-ai`
//!
//! **Responsibility:** AI-assisted content boundary.
//!
//! This crate is intentionally **not** part of the calendar domain:
//! - It must not depend on calendar types; callers translate events into a [`ContentRequest`].
//! - It never persists anything.
//! - Providers are constructed once by the host process and passed in explicitly.

pub mod compliance;
pub mod provider;
pub mod request;
pub mod result;

pub use compliance::{ComplianceChecker, ComplianceReport, ComplianceViolation, Severity};
pub use provider::{ContentProvider, MockContentProvider};
pub use request::{ContentChannel, ContentRequest};
pub use result::{AiError, GeneratedContent};
