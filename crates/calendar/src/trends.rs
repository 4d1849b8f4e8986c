//! Seasonal trend bucketing by calendar month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::{CalendarEvent, PetCategory};
use crate::tally::Tally;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro", "Outubro",
    "Novembro", "Dezembro",
];

/// pt-BR month name for `month` in `1..=12`.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Bucketing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendBucketing {
    /// How many categories to report per bucket.
    pub top_categories: usize,
    /// Inclusive lower bound on `data_inicio`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on `data_inicio`.
    pub to: Option<NaiveDate>,
}

impl Default for TrendBucketing {
    fn default() -> Self {
        Self {
            top_categories: 3,
            from: None,
            to: None,
        }
    }
}

/// One calendar-month bucket (`tendencias_sazonais` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    /// Label such as `"Março 2025"`.
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "total_eventos")]
    pub total: u64,
    #[serde(rename = "principais_categorias")]
    pub top_categories: Vec<PetCategory>,
}

/// Group active events into month buckets, oldest first.
///
/// Months without events produce no bucket.
pub fn compute_trends(events: &[CalendarEvent], bucketing: &TrendBucketing) -> Vec<TrendBucket> {
    let mut buckets: BTreeMap<(i32, u32), Tally<PetCategory>> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_active()) {
        let start = event.start_date;
        if bucketing.from.is_some_and(|from| start < from) || bucketing.to.is_some_and(|to| start > to) {
            continue;
        }
        buckets
            .entry((start.year(), start.month()))
            .or_default()
            .add(event.category);
    }

    buckets
        .into_iter()
        .map(|((year, month), tally)| TrendBucket {
            period: format!("{} {}", month_name(month), year),
            year,
            month,
            total: tally.total(),
            top_categories: tally.top(bucketing.top_categories),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStatus, Priority};
    use chrono::{TimeZone, Utc};
    use petpulse_core::{CalendarEventId, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, category: PetCategory, status: EventStatus) -> CalendarEvent {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CalendarEvent {
            id: CalendarEventId::new(),
            user_id: UserId::new(),
            title: "evento".to_string(),
            description: None,
            start_date: start,
            end_date: None,
            category,
            priority: Priority::Medium,
            status,
            suggested_campaigns: vec![],
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn buckets_are_chronological_and_labelled_in_portuguese() {
        let events = vec![
            event(date(2025, 3, 5), PetCategory::Vaccination, EventStatus::Active),
            event(date(2024, 12, 24), PetCategory::CommemorativeDate, EventStatus::Active),
            event(date(2025, 3, 1), PetCategory::CommemorativeDate, EventStatus::Active),
        ];

        let trends = compute_trends(&events, &TrendBucketing::default());

        let labels: Vec<_> = trends.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(labels, vec!["Dezembro 2024", "Março 2025"]);
        assert_eq!(trends[1].total, 2);
        assert_eq!(
            trends[1].top_categories,
            vec![PetCategory::Vaccination, PetCategory::CommemorativeDate]
        );
    }

    #[test]
    fn top_categories_are_capped_and_ranked() {
        let d = date(2025, 5, 1);
        let events = vec![
            event(d, PetCategory::Other, EventStatus::Active),
            event(d, PetCategory::Vaccination, EventStatus::Active),
            event(d, PetCategory::SeasonalDisease, EventStatus::Active),
            event(d, PetCategory::SeasonalProcedure, EventStatus::Active),
            event(d, PetCategory::Vaccination, EventStatus::Active),
        ];

        let trends = compute_trends(&events, &TrendBucketing::default());

        assert_eq!(trends.len(), 1);
        assert_eq!(
            trends[0].top_categories,
            vec![PetCategory::Vaccination, PetCategory::Other, PetCategory::SeasonalDisease]
        );
    }

    #[test]
    fn inactive_events_and_out_of_range_dates_are_excluded() {
        let events = vec![
            event(date(2025, 1, 10), PetCategory::Other, EventStatus::Cancelled),
            event(date(2025, 2, 10), PetCategory::Other, EventStatus::Active),
            event(date(2025, 6, 10), PetCategory::Other, EventStatus::Active),
        ];
        let bucketing = TrendBucketing {
            from: Some(date(2025, 1, 1)),
            to: Some(date(2025, 5, 31)),
            ..Default::default()
        };

        let trends = compute_trends(&events, &bucketing);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].period, "Fevereiro 2025");
        assert!(trends.iter().all(|b| b.total > 0));
    }

    #[test]
    fn month_name_handles_out_of_range() {
        assert_eq!(month_name(1), "Janeiro");
        assert_eq!(month_name(12), "Dezembro");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }
}
