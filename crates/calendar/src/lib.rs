//! Seasonal calendar module (pet-industry marketing events).
//!
//! This crate holds the calendar event model and the insight engine built on top
//! of it, implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage, no clock reads). Every time-dependent computation takes `today` as a
//! parameter.

pub mod event;
pub mod filter;
pub mod insights;
pub mod knowledge;
pub mod metrics;
pub mod suggestions;
pub mod tally;
pub mod trends;

pub use event::{CalendarEvent, CalendarEventPatch, EventStatus, NewCalendarEvent, PetCategory, Priority};
pub use filter::{EventFilters, apply_filters};
pub use insights::{CalendarInsights, InsightOptions, compute_insights};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, StaticKnowledgeBase};
pub use metrics::{GeneralMetrics, Metrics, compute_metrics};
pub use suggestions::{ContentAngle, ContentOpportunity, SuggestionScope, Suggestions, content_angle, default_campaigns, generate_suggestions};
pub use tally::Tally;
pub use trends::{TrendBucket, TrendBucketing, compute_trends, month_name};

#[cfg(test)]
mod testing;
