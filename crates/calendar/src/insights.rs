//! Combined calendar insights (`CalendarioInsights`).

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::{CalendarEvent, PetCategory};
use crate::filter::{EventFilters, apply_filters};
use crate::knowledge::KnowledgeBase;
use crate::metrics::{GeneralMetrics, compute_metrics};
use crate::suggestions::{SuggestionScope, Suggestions, generate_suggestions};
use crate::trends::{TrendBucket, TrendBucketing, compute_trends};

/// Tunables for an insights run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightOptions {
    /// Forward horizon for `proximos_eventos_criticos` (days, inclusive).
    pub critical_horizon_days: i64,
    /// Forward horizon for content opportunities (days, inclusive).
    pub opportunity_horizon_days: i64,
    /// Categories reported per trend bucket.
    pub trend_top_categories: usize,
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            critical_horizon_days: 30,
            opportunity_horizon_days: 45,
            trend_top_categories: 3,
        }
    }
}

/// Derived insight payload. Never persisted; recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarInsights {
    #[serde(rename = "eventos_mes_atual")]
    pub current_month_events: u64,
    #[serde(rename = "categoria_mais_ativa")]
    pub most_active_category: Option<PetCategory>,
    #[serde(rename = "proximos_eventos_criticos")]
    pub upcoming_critical: Vec<CalendarEvent>,
    #[serde(rename = "sugestoes_ia")]
    pub suggestions: Suggestions,
    #[serde(rename = "metricas_gerais")]
    pub general: GeneralMetrics,
    #[serde(rename = "tendencias_sazonais")]
    pub seasonal_trends: Vec<TrendBucket>,
}

/// Compute insights for one user's events.
///
/// Only active events are considered. `filters` narrows the set (pagination is
/// ignored; aggregates always cover the whole match set). Missed-event
/// detection sees every active event: only a category filter narrows it, and
/// it does so by narrowing the knowledge-base entries checked.
pub fn compute_insights(
    events: &[CalendarEvent],
    filters: &EventFilters,
    today: NaiveDate,
    knowledge: &dyn KnowledgeBase,
    options: &InsightOptions,
) -> CalendarInsights {
    let active: Vec<CalendarEvent> = events.iter().filter(|e| e.is_active()).cloned().collect();
    let selected = apply_filters(&active, &filters.without_pagination());

    let metrics = compute_metrics(&selected, today, options.critical_horizon_days);
    let seasonal_trends = compute_trends(
        &selected,
        &TrendBucketing {
            top_categories: options.trend_top_categories,
            ..Default::default()
        },
    );
    let suggestions = generate_suggestions(
        &active,
        knowledge,
        today,
        &SuggestionScope {
            opportunity_horizon_days: options.opportunity_horizon_days,
            filters: filters.without_pagination(),
        },
    );

    CalendarInsights {
        current_month_events: metrics.current_month,
        most_active_category: metrics.most_active_category,
        upcoming_critical: metrics.upcoming_critical,
        suggestions,
        general: metrics.general,
        seasonal_trends,
    }
}
