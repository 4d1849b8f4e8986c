use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use petpulse_core::{CalendarEventId, DomainError, DomainResult, UserId};

use crate::suggestions::default_campaigns;

/// Implements the wire-name plumbing for closed calendar enums.
///
/// Wire names are the lowercase Portuguese codes the dashboard stores and sends.
macro_rules! impl_wire_enum {
    ($t:ident, $name:literal, [$(($variant:ident, $wire:literal)),+ $(,)?]) => {
        impl $t {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$t] = &[$($t::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($t::$variant => $wire),+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($t::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "invalid {}: '{}' (expected one of: {})",
                        $name,
                        other,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

/// Category tag of a seasonal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetCategory {
    #[serde(rename = "vacinacao")]
    Vaccination,
    #[serde(rename = "doenca_sazonal")]
    SeasonalDisease,
    #[serde(rename = "campanha_preventiva")]
    PreventiveCampaign,
    #[serde(rename = "data_comemorativa")]
    CommemorativeDate,
    #[serde(rename = "procedimento_sazonal")]
    SeasonalProcedure,
    #[serde(rename = "outro")]
    Other,
}

impl_wire_enum!(PetCategory, "categoria_pet", [
    (Vaccination, "vacinacao"),
    (SeasonalDisease, "doenca_sazonal"),
    (PreventiveCampaign, "campanha_preventiva"),
    (CommemorativeDate, "data_comemorativa"),
    (SeasonalProcedure, "procedimento_sazonal"),
    (Other, "outro"),
]);

impl PetCategory {
    /// Human-readable (pt-BR) label for generated text.
    pub fn label(&self) -> &'static str {
        match self {
            PetCategory::Vaccination => "Vacinação",
            PetCategory::SeasonalDisease => "Doença sazonal",
            PetCategory::PreventiveCampaign => "Campanha preventiva",
            PetCategory::CommemorativeDate => "Data comemorativa",
            PetCategory::SeasonalProcedure => "Procedimento sazonal",
            PetCategory::Other => "Outro",
        }
    }

    /// Health topics; copy about them must point owners to a veterinarian.
    pub fn is_health_related(&self) -> bool {
        matches!(self, PetCategory::Vaccination | PetCategory::SeasonalDisease)
    }
}

/// Event priority, declared from lowest to highest so `Ord` sorts by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "critica")]
    Critical,
}

impl_wire_enum!(Priority, "prioridade", [
    (Low, "baixa"),
    (Medium, "media"),
    (High, "alta"),
    (Critical, "critica"),
]);

impl Priority {
    /// High and critical events are surfaced as near-term alerts.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::High | Priority::Critical)
    }
}

/// Event lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "concluido")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl_wire_enum!(EventStatus, "status", [
    (Active, "ativo"),
    (Completed, "concluido"),
    (Cancelled, "cancelado"),
]);

/// A user's seasonal marketing event.
///
/// JSON field names follow the dashboard's Portuguese schema (`evento`,
/// `data_inicio`, ...). Records are only built through [`CalendarEvent::create`]
/// and [`CalendarEvent::apply_patch`], or restored from storage and checked
/// with [`CalendarEvent::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: CalendarEventId,
    pub user_id: UserId,
    #[serde(rename = "evento")]
    pub title: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "data_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "data_fim", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "categoria_pet")]
    pub category: PetCategory,
    #[serde(rename = "prioridade")]
    pub priority: Priority,
    pub status: EventStatus,
    #[serde(rename = "campanhas_sugeridas", default)]
    pub suggested_campaigns: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an event.
///
/// `evento` and `data_inicio` are required but modeled as options so that a
/// missing field surfaces as a domain validation error rather than a decoding
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCalendarEvent {
    #[serde(rename = "evento", default)]
    pub title: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "data_inicio", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "data_fim", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "categoria_pet", default)]
    pub category: Option<PetCategory>,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(rename = "campanhas_sugeridas", default)]
    pub suggested_campaigns: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial update for an event. Absent fields keep their current value.
///
/// `data_fim` and `descricao` distinguish "absent" from an explicit `null`,
/// which clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarEventPatch {
    #[serde(rename = "evento", default)]
    pub title: Option<String>,
    #[serde(rename = "descricao", default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(rename = "data_inicio", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "data_fim", default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(rename = "categoria_pet", default)]
    pub category: Option<PetCategory>,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(rename = "campanhas_sugeridas", default)]
    pub suggested_campaigns: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CalendarEvent {
    /// Validate input and build a new active record owned by `owner`.
    ///
    /// When no campaign ideas are supplied, the category defaults are attached.
    pub fn create(
        id: CalendarEventId,
        owner: UserId,
        input: NewCalendarEvent,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = normalize_title(input.title.as_deref())?;
        let start_date = input
            .start_date
            .ok_or_else(|| DomainError::validation("data_inicio is required"))?;
        let category = input.category.unwrap_or(PetCategory::Other);

        let event = Self {
            id,
            user_id: owner,
            title,
            description: normalize_description(input.description),
            start_date,
            end_date: input.end_date,
            category,
            priority: input.priority.unwrap_or(Priority::Medium),
            status: input.status.unwrap_or(EventStatus::Active),
            suggested_campaigns: match input.suggested_campaigns {
                Some(c) => normalize_labels(c),
                None => default_campaigns(category),
            },
            tags: normalize_labels(input.tags.unwrap_or_default()),
            created_at: now,
            updated_at: now,
        };

        event.validate()?;
        Ok(event)
    }

    /// Apply a partial update. On error the record is left untouched.
    pub fn apply_patch(&mut self, patch: CalendarEventPatch, now: DateTime<Utc>) -> DomainResult<()> {
        let mut next = self.clone();

        if let Some(title) = patch.title {
            next.title = normalize_title(Some(title.as_str()))?;
        }
        if let Some(description) = patch.description {
            next.description = normalize_description(description);
        }
        if let Some(start) = patch.start_date {
            next.start_date = start;
        }
        if let Some(end) = patch.end_date {
            next.end_date = end;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(campaigns) = patch.suggested_campaigns {
            next.suggested_campaigns = normalize_labels(campaigns);
        }
        if let Some(tags) = patch.tags {
            next.tags = normalize_labels(tags);
        }

        next.validate()?;
        next.updated_at = now;
        *self = next;
        Ok(())
    }

    /// Check record invariants (used for restored rows as well as writes).
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("evento cannot be empty"));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(DomainError::validation(format!(
                    "data_fim ({end}) must not precede data_inicio ({})",
                    self.start_date
                )));
            }
        }
        Ok(())
    }

    /// Effective end date (`data_fim` defaults to `data_inicio`).
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Only active events take part in forward-looking insights.
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}

fn normalize_title(title: Option<&str>) -> DomainResult<String> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(DomainError::validation("evento is required"));
    }
    Ok(title.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Trim, drop blanks, and drop duplicates keeping the first occurrence.
fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if label.is_empty() || out.iter().any(|l| l == label) {
            continue;
        }
        out.push(label.to_string());
    }
    out
}
