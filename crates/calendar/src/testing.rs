//! Shared proptest strategies for calendar events.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use petpulse_core::{CalendarEventId, UserId};

use crate::event::{CalendarEvent, EventStatus, PetCategory, Priority};

pub(crate) const TAG_POOL: &[&str] = &["caes", "gatos", "verao", "inverno", "promo"];

pub(crate) fn arb_category() -> impl Strategy<Value = PetCategory> {
    prop::sample::select(PetCategory::ALL)
}

pub(crate) fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL)
}

pub(crate) fn arb_status() -> impl Strategy<Value = EventStatus> {
    prop::sample::select(EventStatus::ALL)
}

pub(crate) fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2023i32..=2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub(crate) fn arb_event() -> impl Strategy<Value = CalendarEvent> {
    (
        arb_date(),
        arb_category(),
        arb_priority(),
        arb_status(),
        prop::sample::subsequence(TAG_POOL, 0..=2),
    )
        .prop_map(|(start, category, priority, status, tags)| {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            CalendarEvent {
                id: CalendarEventId::new(),
                user_id: UserId::new(),
                title: format!("{} {}", category.label(), start),
                description: None,
                start_date: start,
                end_date: None,
                category,
                priority,
                status,
                suggested_campaigns: vec![],
                tags: tags.into_iter().map(str::to_string).collect(),
                created_at: now,
                updated_at: now,
            }
        })
}

pub(crate) fn arb_events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec(arb_event(), 0..60)
}
