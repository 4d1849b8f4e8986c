//! Infrastructure layer: event storage, the calendar service, configuration.

pub mod config;
pub mod repository;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use repository::{CalendarEventRepository, InMemoryCalendarStore, PostgresCalendarStore, RepositoryError};
pub use service::{CalendarService, ServiceError};
