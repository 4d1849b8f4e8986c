//! Service wiring shared by every handler.

use std::sync::Arc;

use petpulse_ai::{ComplianceChecker, ContentProvider, MockContentProvider};
use petpulse_calendar::StaticKnowledgeBase;
use petpulse_infra::{
    AppConfig, CalendarEventRepository, CalendarService, InMemoryCalendarStore, PostgresCalendarStore,
    RepositoryError,
};

/// Store handle used by the HTTP layer.
pub type SharedRepository = Arc<dyn CalendarEventRepository>;

pub struct AppServices {
    pub calendar: CalendarService<SharedRepository>,
    pub content: Arc<dyn ContentProvider>,
    pub compliance: ComplianceChecker,
}

impl AppServices {
    pub fn new(
        calendar: CalendarService<SharedRepository>,
        content: Arc<dyn ContentProvider>,
        compliance: ComplianceChecker,
    ) -> Self {
        Self {
            calendar,
            content,
            compliance,
        }
    }

    /// In-memory store + mock provider (dev and tests).
    pub fn in_memory(config: &AppConfig) -> Self {
        let repo: SharedRepository = Arc::new(InMemoryCalendarStore::new());
        Self::wire(repo, config)
    }

    fn wire(repo: SharedRepository, config: &AppConfig) -> Self {
        let calendar = CalendarService::with_knowledge(
            repo,
            Arc::new(StaticKnowledgeBase::brazil_pet_market()),
            config.insights,
        );
        Self::new(calendar, Arc::new(MockContentProvider::new()), ComplianceChecker::new())
    }
}

/// Pick the store from configuration: Postgres when `DATABASE_URL` is set.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, RepositoryError> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresCalendarStore::connect(url).await?;
            tracing::info!("calendar store: postgres");
            let repo: SharedRepository = Arc::new(store);
            Ok(AppServices::wire(repo, config))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory calendar store");
            Ok(AppServices::in_memory(config))
        }
    }
}
