use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Output of a content generation call.
///
/// This is a draft for a human to review, not a published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "texto")]
    pub body: String,

    pub hashtags: Vec<String>,

    /// Name of the provider that produced the draft.
    #[serde(rename = "provedor")]
    pub provider: String,

    /// Free-form metadata (model name, channel, timings, etc).
    pub metadata: JsonValue,
}

impl GeneratedContent {
    pub fn new(provider: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            hashtags: Vec::new(),
            provider: provider.into(),
            metadata: JsonValue::Null,
        }
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }

    /// Title, body and hashtags joined as they would be published.
    pub fn full_text(&self) -> String {
        let mut text = format!("{}\n\n{}", self.title, self.body);
        if !self.hashtags.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.hashtags.join(" "));
        }
        text
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid content request: {0}")]
    InvalidInput(String),

    /// The backend could not produce a draft.
    #[error("generation failed: {0}")]
    InferenceFailed(String),
}
