//! Marketing compliance checks for pet-health copy.
//!
//! Deterministic and rule-based: the same text always yields the same report.
//! Matching is case-insensitive substring search over the lowercased text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    /// Stable rule identifier, e.g. `claims.absolute`.
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// False iff at least one violation has [`Severity::Error`].
    pub compliant: bool,
    pub violations: Vec<ComplianceViolation>,
}

impl ComplianceReport {
    fn from_violations(violations: Vec<ComplianceViolation>) -> Self {
        let compliant = !violations.iter().any(|v| v.severity == Severity::Error);
        Self { compliant, violations }
    }
}

/// Rule set applied by [`ComplianceChecker::check`].
#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    absolute_claims: Vec<String>,
    self_medication: Vec<String>,
    disclaimer_markers: Vec<String>,
    max_chars: Option<usize>,
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self {
            absolute_claims: to_owned(&[
                "cura garantida",
                "100% eficaz",
                "100% eficiente",
                "100% seguro",
                "sem efeitos colaterais",
                "resultado garantido",
                "imunidade total",
            ]),
            self_medication: to_owned(&[
                "automedicação",
                "automedicacao",
                "dispensa o veterinário",
                "dispensa o veterinario",
                "sem receita",
                "não precisa de veterinário",
                "nao precisa de veterinario",
            ]),
            disclaimer_markers: to_owned(&["veterinári", "veterinari"]),
            max_chars: None,
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ComplianceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a warning when the text exceeds `max_chars` characters.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Check `text`.
    ///
    /// `requires_disclaimer` is set by the caller for health-related content
    /// (vaccination, seasonal disease); such copy must point to a veterinarian.
    pub fn check(&self, text: &str, requires_disclaimer: bool) -> ComplianceReport {
        let haystack = text.to_lowercase();
        let mut violations = Vec::new();

        for claim in self.absolute_claims.iter().filter(|c| haystack.contains(c.as_str())) {
            violations.push(ComplianceViolation {
                rule: "claims.absolute".to_string(),
                severity: Severity::Error,
                message: format!("absolute health claim: '{claim}'"),
            });
        }

        for phrase in self.self_medication.iter().filter(|p| haystack.contains(p.as_str())) {
            violations.push(ComplianceViolation {
                rule: "medication.self".to_string(),
                severity: Severity::Error,
                message: format!("encourages self-medication: '{phrase}'"),
            });
        }

        if requires_disclaimer && !self.disclaimer_markers.iter().any(|m| haystack.contains(m.as_str())) {
            violations.push(ComplianceViolation {
                rule: "disclaimer.veterinary".to_string(),
                severity: Severity::Error,
                message: "health content must recommend consulting a veterinarian".to_string(),
            });
        }

        if let Some(max) = self.max_chars {
            let len = text.chars().count();
            if len > max {
                violations.push(ComplianceViolation {
                    rule: "length.channel".to_string(),
                    severity: Severity::Warning,
                    message: format!("text has {len} characters, channel limit is {max}"),
                });
            }
        }

        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "compliance violations found");
        }
        ComplianceReport::from_violations(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_compliant() {
        let report = ComplianceChecker::new().check("Leve seu pet ao médico veterinário para a vacina.", true);
        assert!(report.compliant);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn absolute_claims_are_errors_regardless_of_case() {
        let report = ComplianceChecker::new().check("Vacina 100% EFICAZ e Sem Efeitos Colaterais!", false);
        assert!(!report.compliant);
        let rules: Vec<_> = report.violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["claims.absolute", "claims.absolute"]);
    }

    #[test]
    fn self_medication_is_flagged() {
        let report = ComplianceChecker::new().check("Vermífugo sem receita, dispensa o veterinário.", false);
        assert!(!report.compliant);
        assert!(report.violations.iter().all(|v| v.rule == "medication.self"));
    }

    #[test]
    fn health_content_needs_disclaimer() {
        let checker = ComplianceChecker::new();
        let report = checker.check("Vacine seu cão em março!", true);
        assert!(!report.compliant);
        assert_eq!(report.violations[0].rule, "disclaimer.veterinary");

        assert!(checker.check("Vacine seu cão em março!", false).compliant);
    }

    #[test]
    fn length_limit_only_warns() {
        let report = ComplianceChecker::new().with_max_chars(10).check("texto bem comprido demais", false);
        assert!(report.compliant);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].severity, Severity::Warning);
    }

    #[test]
    fn report_serializes_lowercase_severity() {
        let report = ComplianceChecker::new().check("cura garantida", false);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["compliant"], false);
        assert_eq!(json["violations"][0]["severity"], "error");
    }
}
