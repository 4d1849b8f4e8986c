use std::collections::HashMap;
use std::sync::RwLock;

use petpulse_calendar::CalendarEvent;
use petpulse_core::{CalendarEventId, UserId};

use super::{CalendarEventRepository, RepositoryError, sort_stored_order};

/// In-memory owner-isolated store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCalendarStore {
    inner: RwLock<HashMap<(UserId, CalendarEventId), CalendarEvent>>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl CalendarEventRepository for InMemoryCalendarStore {
    async fn get(&self, owner: UserId, id: CalendarEventId) -> Result<Option<CalendarEvent>, RepositoryError> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(map.get(&(owner, id)).cloned())
    }

    async fn list(&self, owner: UserId) -> Result<Vec<CalendarEvent>, RepositoryError> {
        let mut events: Vec<CalendarEvent> = {
            let map = self.inner.read().map_err(|_| Self::poisoned())?;
            map.iter()
                .filter_map(|((o, _id), e)| if *o == owner { Some(e.clone()) } else { None })
                .collect()
        };
        sort_stored_order(&mut events);
        Ok(events)
    }

    async fn insert(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        let key = (event.user_id, event.id);
        if map.contains_key(&key) {
            return Err(RepositoryError::Validation(format!("event {} already exists", event.id)));
        }
        map.insert(key, event);
        Ok(())
    }

    async fn update(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        match map.get_mut(&(event.user_id, event.id)) {
            Some(slot) => {
                *slot = event;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, owner: UserId, id: CalendarEventId) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        map.remove(&(owner, id)).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}
