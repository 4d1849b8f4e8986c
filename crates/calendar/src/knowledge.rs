//! Reference catalog of canonical seasonal pet-industry dates.

use serde::{Deserialize, Serialize};

use petpulse_core::{DomainError, DomainResult};

use crate::event::PetCategory;

/// A known seasonal event and the month it usually happens in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria_pet")]
    pub category: PetCategory,
    #[serde(rename = "mes_tipico")]
    pub typical_month: u32,
}

impl KnowledgeEntry {
    pub fn new(name: impl Into<String>, category: PetCategory, typical_month: u32) -> Self {
        Self {
            name: name.into(),
            category,
            typical_month,
        }
    }
}

/// Read-only source of canonical seasonal events.
///
/// Implementations may be static lists or database-backed snapshots; the
/// suggestion generator only needs a stable, ordered slice.
pub trait KnowledgeBase: Send + Sync {
    fn entries(&self) -> &[KnowledgeEntry];
}

/// In-process knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl StaticKnowledgeBase {
    /// Build a catalog, rejecting blank names and months outside `1..=12`.
    pub fn new(entries: Vec<KnowledgeEntry>) -> DomainResult<Self> {
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(DomainError::validation("knowledge entry name cannot be empty"));
            }
            if !(1..=12).contains(&entry.typical_month) {
                return Err(DomainError::validation(format!(
                    "knowledge entry '{}' has invalid month {}",
                    entry.name, entry.typical_month
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Canonical calendar for the Brazilian pet market.
    pub fn brazil_pet_market() -> Self {
        use PetCategory::*;

        let entries = vec![
            KnowledgeEntry::new("Prevenção de pulgas e carrapatos no verão", SeasonalDisease, 1),
            KnowledgeEntry::new("Dia Internacional do Gato", CommemorativeDate, 2),
            KnowledgeEntry::new("Carnaval Pet", CommemorativeDate, 2),
            KnowledgeEntry::new("Prevenção da leishmaniose", SeasonalDisease, 3),
            KnowledgeEntry::new("Abril Laranja - prevenção à crueldade animal", PreventiveCampaign, 4),
            KnowledgeEntry::new("Vacinação contra gripe canina", Vaccination, 5),
            KnowledgeEntry::new("Doenças respiratórias no inverno", SeasonalDisease, 6),
            KnowledgeEntry::new("Tosa e banho de inverno", SeasonalProcedure, 7),
            KnowledgeEntry::new("Campanha de Vacinação Antirrábica", Vaccination, 8),
            KnowledgeEntry::new("Dia do Médico Veterinário", CommemorativeDate, 9),
            KnowledgeEntry::new("Dia Mundial dos Animais", CommemorativeDate, 10),
            KnowledgeEntry::new("Outubro Rosa Pet", PreventiveCampaign, 10),
            KnowledgeEntry::new("Novembro Azul Pet", PreventiveCampaign, 11),
            KnowledgeEntry::new("Dezembro Verde - combate ao abandono", PreventiveCampaign, 12),
            KnowledgeEntry::new("Tosa higiênica de verão", SeasonalProcedure, 12),
        ];

        Self { entries }
    }
}

impl Default for StaticKnowledgeBase {
    fn default() -> Self {
        Self::brazil_pet_market()
    }
}

impl KnowledgeBase for StaticKnowledgeBase {
    fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }
}
