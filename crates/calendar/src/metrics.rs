//! Insight aggregator: counts, distributions and near-term windows.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::{CalendarEvent, PetCategory, Priority};
use crate::tally::Tally;

/// Short forward window (days, both bounds inclusive).
pub const NEXT_7_DAYS: i64 = 7;
/// Long forward window (days, both bounds inclusive).
pub const NEXT_30_DAYS: i64 = 30;

/// `metricas_gerais` block of the insights payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralMetrics {
    #[serde(rename = "total_eventos_ativos")]
    pub total_active: u64,
    #[serde(rename = "eventos_proximos_7_dias")]
    pub next_7_days: u64,
    #[serde(rename = "eventos_proximos_30_dias")]
    pub next_30_days: u64,
    #[serde(rename = "distribuicao_por_prioridade")]
    pub by_priority: Tally<Priority>,
    #[serde(rename = "distribuicao_por_categoria")]
    pub by_category: Tally<PetCategory>,
}

/// Aggregated metrics over a set of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// Active events starting in `today`'s month and year.
    pub current_month: u64,
    /// Category with the most active events (first-seen wins ties).
    pub most_active_category: Option<PetCategory>,
    /// High/critical active events starting within the critical horizon, by start date.
    pub upcoming_critical: Vec<CalendarEvent>,
    pub general: GeneralMetrics,
}

/// Compute metrics in a single pass over `events`.
///
/// Non-active events are skipped, so callers may pass an unfiltered list.
/// `critical_horizon_days` bounds `upcoming_critical` (inclusive on both ends).
pub fn compute_metrics(events: &[CalendarEvent], today: NaiveDate, critical_horizon_days: i64) -> Metrics {
    let mut total_active = 0u64;
    let mut current_month = 0u64;
    let mut next_7_days = 0u64;
    let mut next_30_days = 0u64;
    let mut by_priority = Tally::new();
    let mut by_category = Tally::new();
    let mut upcoming_critical = Vec::new();

    for event in events.iter().filter(|e| e.is_active()) {
        total_active += 1;
        by_priority.add(event.priority);
        by_category.add(event.category);

        let start = event.start_date;
        if start.year() == today.year() && start.month() == today.month() {
            current_month += 1;
        }

        let days_ahead = (start - today).num_days();
        if (0..=NEXT_7_DAYS).contains(&days_ahead) {
            next_7_days += 1;
        }
        if (0..=NEXT_30_DAYS).contains(&days_ahead) {
            next_30_days += 1;
        }
        if event.priority.is_urgent() && (0..=critical_horizon_days).contains(&days_ahead) {
            upcoming_critical.push(event.clone());
        }
    }

    upcoming_critical.sort_by_key(|e| e.start_date);

    Metrics {
        current_month,
        most_active_category: by_category.leader(),
        upcoming_critical,
        general: GeneralMetrics {
            total_active,
            next_7_days,
            next_30_days,
            by_priority,
            by_category,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;
    use chrono::{TimeZone, Utc};
    use petpulse_core::{CalendarEventId, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, start: NaiveDate, category: PetCategory, priority: Priority, status: EventStatus) -> CalendarEvent {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CalendarEvent {
            id: CalendarEventId::new(),
            user_id: UserId::new(),
            title: title.to_string(),
            description: None,
            start_date: start,
            end_date: None,
            category,
            priority,
            status,
            suggested_campaigns: vec![],
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn march_scenario_counts_month_and_breaks_tie_by_first_seen() {
        let events = vec![
            event("Vacinação V10", date(2025, 3, 5), PetCategory::Vaccination, Priority::High, EventStatus::Active),
            event("Carnaval Pet", date(2025, 3, 1), PetCategory::CommemorativeDate, Priority::Medium, EventStatus::Active),
        ];

        let m = compute_metrics(&events, date(2025, 3, 10), 30);

        assert_eq!(m.current_month, 2);
        assert_eq!(m.most_active_category, Some(PetCategory::Vaccination));
        assert_eq!(m.general.next_7_days, 0);
        assert_eq!(m.general.next_30_days, 0);
        assert_eq!(m.general.total_active, 2);
        assert!(m.upcoming_critical.is_empty());
    }

    #[test]
    fn cancelled_and_completed_events_are_never_counted() {
        let today = date(2025, 3, 10);
        let events = vec![
            event("Cancelado", today, PetCategory::Vaccination, Priority::Critical, EventStatus::Cancelled),
            event("Concluído", today, PetCategory::Vaccination, Priority::Critical, EventStatus::Completed),
            event("Ativo", date(2025, 4, 1), PetCategory::Other, Priority::Low, EventStatus::Active),
        ];

        let m = compute_metrics(&events, today, 30);

        assert_eq!(m.general.total_active, 1);
        assert_eq!(m.current_month, 0);
        assert_eq!(m.general.next_7_days, 0);
        assert_eq!(m.general.by_category.get(PetCategory::Vaccination), 0);
        assert_eq!(m.general.by_priority.get(Priority::Critical), 0);
        assert_eq!(m.most_active_category, Some(PetCategory::Other));
        assert!(m.upcoming_critical.is_empty());
    }

    #[test]
    fn windows_include_both_bounds() {
        let today = date(2025, 3, 10);
        let events = vec![
            event("hoje", today, PetCategory::Other, Priority::Low, EventStatus::Active),
            event("+7", date(2025, 3, 17), PetCategory::Other, Priority::Low, EventStatus::Active),
            event("+8", date(2025, 3, 18), PetCategory::Other, Priority::Low, EventStatus::Active),
            event("+30", date(2025, 4, 9), PetCategory::Other, Priority::Low, EventStatus::Active),
            event("+31", date(2025, 4, 10), PetCategory::Other, Priority::Low, EventStatus::Active),
            event("ontem", date(2025, 3, 9), PetCategory::Other, Priority::Low, EventStatus::Active),
        ];

        let m = compute_metrics(&events, today, 30);

        assert_eq!(m.general.next_7_days, 2);
        assert_eq!(m.general.next_30_days, 4);
    }

    #[test]
    fn upcoming_critical_is_sorted_and_limited_to_urgent_priorities() {
        let today = date(2025, 3, 10);
        let events = vec![
            event("later", date(2025, 3, 25), PetCategory::Vaccination, Priority::Critical, EventStatus::Active),
            event("medium", date(2025, 3, 11), PetCategory::Vaccination, Priority::Medium, EventStatus::Active),
            event("sooner", date(2025, 3, 12), PetCategory::SeasonalDisease, Priority::High, EventStatus::Active),
            event("too far", date(2025, 6, 1), PetCategory::Vaccination, Priority::Critical, EventStatus::Active),
        ];

        let m = compute_metrics(&events, today, 30);

        let titles: Vec<_> = m.upcoming_critical.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later"]);
    }

    #[test]
    fn distributions_are_sparse() {
        let events = vec![event("a", date(2025, 1, 1), PetCategory::Vaccination, Priority::High, EventStatus::Active)];
        let m = compute_metrics(&events, date(2025, 1, 1), 30);
        assert_eq!(m.general.by_category.len(), 1);
        assert_eq!(m.general.by_priority.len(), 1);

        let json = serde_json::to_value(&m.general).unwrap();
        assert_eq!(json["distribuicao_por_categoria"], serde_json::json!({"vacinacao": 1}));
        assert_eq!(json["distribuicao_por_prioridade"], serde_json::json!({"alta": 1}));
    }

    #[test]
    fn empty_input_has_no_leader() {
        let m = compute_metrics(&[], date(2025, 1, 1), 30);
        assert_eq!(m.most_active_category, None);
        assert_eq!(m.general.total_active, 0);
    }
}
