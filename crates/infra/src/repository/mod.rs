//! Owner-scoped calendar event storage.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use petpulse_calendar::CalendarEvent;
use petpulse_core::{CalendarEventId, DomainError, UserId};

pub use in_memory::InMemoryCalendarStore;
pub use postgres::PostgresCalendarStore;

/// Storage-level failure.
///
/// These are **infrastructure errors**; domain validation happens before a
/// repository is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record with that id exists for the requesting owner.
    #[error("calendar event not found")]
    NotFound,

    /// A stored or submitted record violates calendar invariants.
    #[error("invalid record: {0}")]
    Validation(String),

    /// The backing store could not be reached or failed the query.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for RepositoryError {
    fn from(err: DomainError) -> Self {
        RepositoryError::Validation(err.to_string())
    }
}

/// Owner-scoped calendar event repository.
///
/// ## Ownership
///
/// Every operation is keyed by `(owner, id)`. A record owned by someone else is
/// indistinguishable from a missing one: `get` returns `None`, `update` and
/// `delete` return [`RepositoryError::NotFound`].
///
/// ## Ordering
///
/// `list` returns events in stored order: `data_inicio` ascending, then
/// `created_at`, then id.
#[async_trait::async_trait]
pub trait CalendarEventRepository: Send + Sync {
    async fn get(&self, owner: UserId, id: CalendarEventId) -> Result<Option<CalendarEvent>, RepositoryError>;

    async fn list(&self, owner: UserId) -> Result<Vec<CalendarEvent>, RepositoryError>;

    /// Store a new record. The owner is `event.user_id`.
    async fn insert(&self, event: CalendarEvent) -> Result<(), RepositoryError>;

    /// Replace an existing record owned by `event.user_id`.
    async fn update(&self, event: CalendarEvent) -> Result<(), RepositoryError>;

    async fn delete(&self, owner: UserId, id: CalendarEventId) -> Result<(), RepositoryError>;
}

#[async_trait::async_trait]
impl<S> CalendarEventRepository for Arc<S>
where
    S: CalendarEventRepository + ?Sized,
{
    async fn get(&self, owner: UserId, id: CalendarEventId) -> Result<Option<CalendarEvent>, RepositoryError> {
        (**self).get(owner, id).await
    }

    async fn list(&self, owner: UserId) -> Result<Vec<CalendarEvent>, RepositoryError> {
        (**self).list(owner).await
    }

    async fn insert(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        (**self).insert(event).await
    }

    async fn update(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        (**self).update(event).await
    }

    async fn delete(&self, owner: UserId, id: CalendarEventId) -> Result<(), RepositoryError> {
        (**self).delete(owner, id).await
    }
}

/// Stored-order sort key shared by all implementations.
pub(crate) fn sort_stored_order(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| {
        (a.start_date, a.created_at, a.id).cmp(&(b.start_date, b.created_at, b.id))
    });
}
