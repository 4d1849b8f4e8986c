//! Heuristic suggestion generator: missed seasonal dates and content opportunities.
//!
//! Everything here is a static mapping over the event set and the knowledge
//! base. Generative content lives behind the AI provider boundary, not here.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use petpulse_core::CalendarEventId;

use crate::event::{CalendarEvent, PetCategory};
use crate::filter::EventFilters;
use crate::knowledge::KnowledgeBase;
use crate::trends::month_name;

/// How far (in months) an event may sit from a catalog entry's typical month and still cover it.
pub const MATCH_WINDOW_MONTHS: u32 = 1;

/// Scope for a suggestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionScope {
    /// Forward horizon for content opportunities (days, inclusive).
    pub opportunity_horizon_days: i64,
    /// Content opportunities honour every criterion. Missed-event detection
    /// only honours `category`: any active event of a category covers its dates.
    pub filters: EventFilters,
}

impl Default for SuggestionScope {
    fn default() -> Self {
        Self {
            opportunity_horizon_days: 45,
            filters: EventFilters::default(),
        }
    }
}

/// Static content angle for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAngle {
    pub angle: &'static str,
    pub formats: &'static [&'static str],
}

/// An upcoming event paired with a suggested content angle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentOpportunity {
    #[serde(rename = "evento_id")]
    pub event_id: CalendarEventId,
    #[serde(rename = "evento")]
    pub title: String,
    #[serde(rename = "data_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "categoria_pet")]
    pub category: PetCategory,
    #[serde(rename = "dias_restantes")]
    pub days_remaining: i64,
    #[serde(rename = "angulo_sugerido")]
    pub angle: String,
    #[serde(rename = "formatos")]
    pub formats: Vec<String>,
}

/// `sugestoes_ia` block of the insights payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    #[serde(rename = "eventos_perdidos")]
    pub missed_events: Vec<String>,
    #[serde(rename = "oportunidades_conteudo")]
    pub content_opportunities: Vec<ContentOpportunity>,
}

pub fn content_angle(category: PetCategory) -> ContentAngle {
    match category {
        PetCategory::Vaccination => ContentAngle {
            angle: "Lembrete do calendário vacinal com orientação do médico veterinário",
            formats: &["post educativo", "story com contagem regressiva", "mensagem de lembrete"],
        },
        PetCategory::SeasonalDisease => ContentAngle {
            angle: "Sinais de alerta da estação e como prevenir",
            formats: &["carrossel de sintomas", "vídeo curto", "artigo no blog"],
        },
        PetCategory::PreventiveCampaign => ContentAngle {
            angle: "Chamada para check-up preventivo com benefício da campanha",
            formats: &["post de campanha", "e-mail marketing", "banner no site"],
        },
        PetCategory::CommemorativeDate => ContentAngle {
            angle: "Celebração da data com conteúdo de engajamento e fotos dos clientes",
            formats: &["post comemorativo", "concurso de fotos", "reels"],
        },
        PetCategory::SeasonalProcedure => ContentAngle {
            angle: "Agenda aberta para o procedimento da estação e cuidados pós-serviço",
            formats: &["story com agenda", "antes e depois", "mensagem no WhatsApp"],
        },
        PetCategory::Other => ContentAngle {
            angle: "Dica prática de bem-estar relacionada ao evento",
            formats: &["post informativo", "story"],
        },
    }
}

/// Campaign ideas attached to new events that arrive without their own.
pub fn default_campaigns(category: PetCategory) -> Vec<String> {
    let ideas: &[&str] = match category {
        PetCategory::Vaccination => &["Mutirão de vacinação", "Cartão de vacina em dia"],
        PetCategory::SeasonalDisease => &["Guia de prevenção da estação", "Check-up sazonal"],
        PetCategory::PreventiveCampaign => &["Pacote de exames preventivos"],
        PetCategory::CommemorativeDate => &["Sorteio comemorativo", "Desconto do dia"],
        PetCategory::SeasonalProcedure => &["Agenda antecipada com desconto"],
        PetCategory::Other => &[],
    };
    ideas.iter().map(|s| s.to_string()).collect()
}

/// Derive missed events and content opportunities from active events.
///
/// - A catalog entry is *missed* when its typical month is earlier than
///   `today`'s month and no active event of the same category starts in the
///   current year within [`MATCH_WINDOW_MONTHS`] of that month.
/// - A *content opportunity* is an active event starting within
///   `[today, today + opportunity_horizon_days]`, soonest first.
pub fn generate_suggestions(
    events: &[CalendarEvent],
    knowledge: &dyn KnowledgeBase,
    today: NaiveDate,
    scope: &SuggestionScope,
) -> Suggestions {
    let mut covered: HashSet<(PetCategory, u32)> = HashSet::new();
    let mut content_opportunities = Vec::new();

    for event in events.iter().filter(|e| e.is_active()) {
        if event.start_date.year() == today.year() {
            covered.insert((event.category, event.start_date.month()));
        }
        if !scope.filters.matches(event) {
            continue;
        }

        let days_remaining = (event.start_date - today).num_days();
        if (0..=scope.opportunity_horizon_days).contains(&days_remaining) {
            let angle = content_angle(event.category);
            content_opportunities.push(ContentOpportunity {
                event_id: event.id,
                title: event.title.clone(),
                start_date: event.start_date,
                category: event.category,
                days_remaining,
                angle: angle.angle.to_string(),
                formats: angle.formats.iter().map(|f| f.to_string()).collect(),
            });
        }
    }
    content_opportunities.sort_by_key(|o| o.start_date);

    let missed_events = knowledge
        .entries()
        .iter()
        .filter(|entry| scope.filters.category.is_none_or(|c| c == entry.category))
        .filter(|entry| entry.typical_month < today.month())
        .filter(|entry| {
            let lo = entry.typical_month.saturating_sub(MATCH_WINDOW_MONTHS).max(1);
            let hi = (entry.typical_month + MATCH_WINDOW_MONTHS).min(12);
            !(lo..=hi).any(|m| covered.contains(&(entry.category, m)))
        })
        .map(|entry| format!("{} ({})", entry.name, month_name(entry.typical_month)))
        .collect();

    Suggestions {
        missed_events,
        content_opportunities,
    }
}
