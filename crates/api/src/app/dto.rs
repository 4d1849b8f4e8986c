use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use petpulse_ai::{ComplianceReport, ContentChannel, GeneratedContent};
use petpulse_calendar::{CalendarEvent, PetCategory};

// -------------------------
// Request DTOs
// -------------------------

/// `?data_referencia=YYYY-MM-DD` override for the insights reference date.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceDateQuery {
    pub data_referencia: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "canal", default)]
    pub channel: Option<ContentChannel>,
    #[serde(rename = "tom", default)]
    pub tone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ComplianceCheckRequest {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "categoria_pet", default)]
    pub category: Option<PetCategory>,
    #[serde(rename = "canal", default)]
    pub channel: Option<ContentChannel>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct EventList {
    pub items: Vec<CalendarEvent>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedContentResponse {
    pub event_id: String,
    #[serde(rename = "conteudo")]
    pub content: GeneratedContent,
    #[serde(rename = "conformidade")]
    pub compliance: ComplianceReport,
}
