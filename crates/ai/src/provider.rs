use serde_json::json;

use crate::request::ContentRequest;
use crate::result::{AiError, GeneratedContent};

/// Content generation backend.
///
/// Hosts build exactly one provider at startup and share it (usually behind an
/// `Arc<dyn ContentProvider>`); nothing in this crate keeps a global instance.
pub trait ContentProvider: Send + Sync + 'static {
    /// Short identifier reported in generated drafts.
    fn name(&self) -> &str;

    /// Produce a draft for an already validated request.
    fn generate(&self, request: &ContentRequest) -> Result<GeneratedContent, AiError>;

    /// Validate, then generate.
    fn run(&self, request: &ContentRequest) -> Result<GeneratedContent, AiError> {
        request.validate()?;
        let content = self.generate(request)?;
        tracing::debug!(provider = self.name(), topic = %request.topic, "content draft generated");
        Ok(content)
    }
}

const VET_GUIDANCE: &str = "\n\nConsulte sempre o médico veterinário de confiança do seu pet.";

/// Deterministic template-based provider used in development and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockContentProvider;

impl MockContentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ContentProvider for MockContentProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, request: &ContentRequest) -> Result<GeneratedContent, AiError> {
        let title = match &request.date_label {
            Some(date) => format!("{} ({date})", request.topic.trim()),
            None => request.topic.trim().to_string(),
        };

        let mut body = format!("{}.", request.angle.trim().trim_end_matches('.'));
        if let Some(tone) = &request.tone {
            body.push_str(&format!(" Tom: {tone}."));
        }
        body.push_str(&format!(
            "\n\nCategoria: {}. Agende um horário e prepare seu pet para a data.",
            request.category_label
        ));

        // The guidance line is never truncated; the rest of the body gives way.
        let budget = request.channel.max_chars().saturating_sub(VET_GUIDANCE.chars().count());
        if body.chars().count() > budget {
            body = body.chars().take(budget).collect();
        }
        body.push_str(VET_GUIDANCE);

        Ok(GeneratedContent::new(self.name(), title, body)
            .with_hashtags(hashtags_for(&request.topic))
            .with_metadata(json!({
                "kind": "content.draft",
                "channel": request.channel,
                "template": "mock.v1",
            })))
    }
}

/// `#pet` plus one tag per significant topic word, in order, without duplicates.
fn hashtags_for(topic: &str) -> Vec<String> {
    let mut tags = vec!["#pet".to_string()];
    for word in topic.split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() <= 3 {
            continue;
        }
        let tag = format!("#{}", word.to_lowercase());
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::ComplianceChecker;
    use crate::request::ContentChannel;

    fn request() -> ContentRequest {
        ContentRequest::new("Vacinação V10", "Vacinação", "Lembrete do calendário vacinal")
            .with_date_label("05/03/2025")
    }

    #[test]
    fn mock_output_is_deterministic() {
        let provider = MockContentProvider::new();
        let a = provider.run(&request()).unwrap();
        let b = provider.run(&request()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.provider, "mock");
        assert_eq!(a.title, "Vacinação V10 (05/03/2025)");
        assert!(a.body.contains("médico veterinário"));
    }

    #[test]
    fn hashtags_skip_short_words_and_duplicates() {
        assert_eq!(
            hashtags_for("Dia do Gato e do gato"),
            vec!["#pet".to_string(), "#gato".to_string()]
        );
        assert_eq!(hashtags_for("Vacinação V10")[1], "#vacinação");
    }

    #[test]
    fn run_rejects_empty_topic() {
        let provider = MockContentProvider::new();
        let req = ContentRequest::new("   ", "Outro", "angulo");
        assert!(matches!(provider.run(&req), Err(AiError::InvalidInput(_))));
    }

    #[test]
    fn body_respects_channel_limit() {
        let provider = MockContentProvider::new();
        let req = ContentRequest::new("Tópico", "Outro", "a".repeat(5_000)).with_channel(ContentChannel::Whatsapp);
        let out = provider.run(&req).unwrap();
        assert!(out.body.chars().count() <= ContentChannel::Whatsapp.max_chars());
    }

    #[test]
    fn oversized_tone_keeps_veterinary_guidance() {
        let provider = MockContentProvider::new();
        let req = request().with_tone(Some("x".repeat(3_000)));
        let out = provider.run(&req).unwrap();

        assert!(out.body.chars().count() <= ContentChannel::Instagram.max_chars());
        assert!(out.body.ends_with(VET_GUIDANCE));

        let report = ComplianceChecker::new()
            .with_max_chars(ContentChannel::Instagram.max_chars())
            .check(&out.full_text(), true);
        assert!(report.compliant, "{:?}", report.violations);
    }

    #[test]
    fn provider_is_object_safe() {
        let provider: std::sync::Arc<dyn ContentProvider> = std::sync::Arc::new(MockContentProvider::new());
        assert_eq!(provider.name(), "mock");
    }
}
