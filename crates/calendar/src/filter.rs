//! Filter engine: category / month / priority / status / tag filters plus pagination.

use chrono::Datelike;
use serde::{Deserialize, Deserializer};

use crate::event::{CalendarEvent, EventStatus, PetCategory, Priority};

/// Optional filter criteria. Absent fields impose no constraint.
///
/// Decodes from JSON bodies and from query strings (`?mes=03&tags=verao,caes`).
/// In a query string `tags` is a single comma-separated value.
/// An out-of-range `mes` is rejected while decoding, so an `EventFilters` value
/// always holds a month in `1..=12`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilters {
    #[serde(rename = "categoria_pet", default)]
    pub category: Option<PetCategory>,
    #[serde(rename = "mes", default, deserialize_with = "deserialize_month")]
    pub month: Option<u32>,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Any-match: an event passes when it carries at least one of these tags.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl EventFilters {
    /// Whether `event` satisfies every non-pagination criterion.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if self.category.is_some_and(|c| c != event.category) {
            return false;
        }
        if self.month.is_some_and(|m| m != event.start_date.month()) {
            return false;
        }
        if self.priority.is_some_and(|p| p != event.priority) {
            return false;
        }
        if self.status.is_some_and(|s| s != event.status) {
            return false;
        }
        if !self.tags.is_empty() && !event.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        true
    }

    /// Same criteria with `limit`/`offset` removed (aggregations look at the whole match set).
    pub fn without_pagination(&self) -> Self {
        Self {
            limit: None,
            offset: None,
            ..self.clone()
        }
    }
}

/// Return the matching events in their original order, then apply `offset`/`limit`.
///
/// Pure and total: an offset past the end yields an empty list.
pub fn apply_filters(events: &[CalendarEvent], filters: &EventFilters) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|e| filters.matches(e))
        .skip(filters.offset.unwrap_or(0))
        .take(filters.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MonthRepr {
    Number(u32),
    Text(String),
}

fn deserialize_month<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let month = match Option::<MonthRepr>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(MonthRepr::Number(n)) => n,
        Some(MonthRepr::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(MonthRepr::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid mes '{s}': expected 1-12")))?,
    };
    if !(1..=12).contains(&month) {
        return Err(serde::de::Error::custom(format!(
            "invalid mes {month}: expected 1-12"
        )));
    }
    Ok(Some(month))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Csv(String),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<TagsRepr>::deserialize(deserializer)? {
        None => return Ok(Vec::new()),
        Some(TagsRepr::List(v)) => v,
        Some(TagsRepr::Csv(s)) => s.split(',').map(str::to_string).collect(),
    };
    Ok(raw
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use petpulse_core::{CalendarEventId, UserId};

    fn event(title: &str, start: (i32, u32, u32), category: PetCategory, priority: Priority, tags: &[&str]) -> CalendarEvent {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CalendarEvent {
            id: CalendarEventId::new(),
            user_id: UserId::new(),
            title: title.to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: None,
            category,
            priority,
            status: EventStatus::Active,
            suggested_campaigns: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<CalendarEvent> {
        vec![
            event("Vacinação V10", (2025, 3, 5), PetCategory::Vaccination, Priority::High, &["caes"]),
            event("Carnaval Pet", (2025, 3, 1), PetCategory::CommemorativeDate, Priority::Medium, &["festa"]),
            event("Antirrábica", (2024, 8, 10), PetCategory::Vaccination, Priority::Critical, &["caes", "gatos"]),
            event("Março 2023", (2023, 3, 20), PetCategory::Other, Priority::Low, &[]),
        ]
    }

    fn titles(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let events = sample();
        assert_eq!(apply_filters(&events, &EventFilters::default()), events);
    }

    #[test]
    fn month_filter_ignores_year() {
        let filters: EventFilters = serde_json::from_str(r#"{"mes":"03"}"#).unwrap();
        assert_eq!(filters.month, Some(3));
        let out = apply_filters(&sample(), &filters);
        assert_eq!(titles(&out), vec!["Vacinação V10", "Carnaval Pet", "Março 2023"]);
    }

    #[test]
    fn month_accepts_number_and_rejects_out_of_range() {
        let filters: EventFilters = serde_json::from_str(r#"{"mes":8}"#).unwrap();
        assert_eq!(filters.month, Some(8));
        assert!(serde_json::from_str::<EventFilters>(r#"{"mes":"13"}"#).is_err());
        assert!(serde_json::from_str::<EventFilters>(r#"{"mes":0}"#).is_err());
        assert!(serde_json::from_str::<EventFilters>(r#"{"mes":"marco"}"#).is_err());
    }

    #[test]
    fn tags_match_any_and_accept_csv() {
        let filters: EventFilters = serde_json::from_str(r#"{"tags":"gatos, festa"}"#).unwrap();
        assert_eq!(filters.tags, vec!["gatos".to_string(), "festa".to_string()]);
        let out = apply_filters(&sample(), &filters);
        assert_eq!(titles(&out), vec!["Carnaval Pet", "Antirrábica"]);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let filters = EventFilters {
            category: Some(PetCategory::Vaccination),
            priority: Some(Priority::Critical),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(&sample(), &filters)), vec!["Antirrábica"]);
    }

    #[test]
    fn status_filter_selects_cancelled_events() {
        let mut events = sample();
        events[1].status = EventStatus::Cancelled;
        let filters = EventFilters {
            status: Some(EventStatus::Cancelled),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(&events, &filters)), vec!["Carnaval Pet"]);
    }

    #[test]
    fn pagination_applies_after_filtering() {
        let filters = EventFilters {
            month: Some(3),
            limit: Some(1),
            offset: Some(1),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(&sample(), &filters)), vec!["Carnaval Pet"]);
    }

    #[test]
    fn offset_past_end_is_empty_not_an_error() {
        let filters = EventFilters {
            offset: Some(100),
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &filters).is_empty());
    }

    #[test]
    fn without_pagination_drops_only_limit_and_offset() {
        let filters = EventFilters {
            month: Some(3),
            limit: Some(1),
            offset: Some(2),
            ..Default::default()
        };
        let stripped = filters.without_pagination();
        assert_eq!((stripped.limit, stripped.offset), (None, None));
        assert_eq!(stripped.month, Some(3));
    }
}
