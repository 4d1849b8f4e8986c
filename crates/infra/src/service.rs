//! Calendar service: the owner-scoped accessor that HTTP handlers call.
//!
//! Validation lives in `petpulse-calendar` and runs before the repository is
//! touched; insight computation is delegated to the pure engine with an
//! explicit `today`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::instrument;

use petpulse_calendar::{
    CalendarEvent, CalendarEventPatch, CalendarInsights, EventFilters, InsightOptions, KnowledgeBase,
    NewCalendarEvent, StaticKnowledgeBase, apply_filters, compute_insights,
};
use petpulse_core::{CalendarEventId, DomainError, UserId};

use crate::repository::{CalendarEventRepository, RepositoryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("calendar event not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Validation(msg) => ServiceError::Validation(msg),
            RepositoryError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
        }
    }
}

pub struct CalendarService<R> {
    repo: R,
    knowledge: Arc<dyn KnowledgeBase>,
    options: InsightOptions,
}

impl<R: CalendarEventRepository> CalendarService<R> {
    /// Service over `repo` with the built-in knowledge base and default horizons.
    pub fn new(repo: R) -> Self {
        Self::with_knowledge(repo, Arc::new(StaticKnowledgeBase::default()), InsightOptions::default())
    }

    pub fn with_knowledge(repo: R, knowledge: Arc<dyn KnowledgeBase>, options: InsightOptions) -> Self {
        Self {
            repo,
            knowledge,
            options,
        }
    }

    /// Every active event owned by `owner`, in stored order.
    #[instrument(skip(self), fields(user_id = %owner), err)]
    pub async fn list_active_events(&self, owner: UserId) -> Result<Vec<CalendarEvent>, ServiceError> {
        let events = self.repo.list(owner).await?;
        Ok(events.into_iter().filter(|e| e.is_active()).collect())
    }

    /// Owner's events narrowed by `filters` (including pagination).
    #[instrument(skip(self, filters), fields(user_id = %owner), err)]
    pub async fn list_events(&self, owner: UserId, filters: &EventFilters) -> Result<Vec<CalendarEvent>, ServiceError> {
        let events = self.repo.list(owner).await?;
        let selected = apply_filters(&events, filters);
        tracing::debug!(total = events.len(), selected = selected.len(), "events listed");
        Ok(selected)
    }

    #[instrument(skip(self), fields(user_id = %owner, event_id = %id), err)]
    pub async fn get_event(&self, owner: UserId, id: CalendarEventId) -> Result<CalendarEvent, ServiceError> {
        self.repo.get(owner, id).await?.ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self, input), fields(user_id = %owner), err)]
    pub async fn create_event(
        &self,
        owner: UserId,
        input: NewCalendarEvent,
        now: DateTime<Utc>,
    ) -> Result<CalendarEvent, ServiceError> {
        let event = CalendarEvent::create(CalendarEventId::new(), owner, input, now)?;
        self.repo.insert(event.clone()).await?;
        tracing::info!(event_id = %event.id, category = %event.category, "calendar event created");
        Ok(event)
    }

    #[instrument(skip(self, patch), fields(user_id = %owner, event_id = %id), err)]
    pub async fn update_event(
        &self,
        owner: UserId,
        id: CalendarEventId,
        patch: CalendarEventPatch,
        now: DateTime<Utc>,
    ) -> Result<CalendarEvent, ServiceError> {
        let mut event = self.get_event(owner, id).await?;
        event.apply_patch(patch, now)?;
        self.repo.update(event.clone()).await?;
        tracing::info!("calendar event updated");
        Ok(event)
    }

    #[instrument(skip(self), fields(user_id = %owner, event_id = %id), err)]
    pub async fn delete_event(&self, owner: UserId, id: CalendarEventId) -> Result<(), ServiceError> {
        self.repo.delete(owner, id).await?;
        tracing::info!("calendar event deleted");
        Ok(())
    }

    /// Combined insights over the owner's active events narrowed by `filters`.
    #[instrument(skip(self, filters), fields(user_id = %owner, today = %today), err)]
    pub async fn insights(
        &self,
        owner: UserId,
        filters: &EventFilters,
        today: NaiveDate,
    ) -> Result<CalendarInsights, ServiceError> {
        let events = self.list_active_events(owner).await?;
        Ok(compute_insights(&events, filters, today, &*self.knowledge, &self.options))
    }
}
