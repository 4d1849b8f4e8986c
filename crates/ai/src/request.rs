use serde::{Deserialize, Serialize};

use crate::result::AiError;

/// Target channel for a content draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentChannel {
    #[default]
    Instagram,
    Email,
    Blog,
    Whatsapp,
}

impl ContentChannel {
    /// Publishing limit for the channel body, in characters.
    pub fn max_chars(&self) -> usize {
        match self {
            ContentChannel::Instagram => 2_200,
            ContentChannel::Email => 5_000,
            ContentChannel::Blog => 20_000,
            ContentChannel::Whatsapp => 1_000,
        }
    }
}

/// Provider-agnostic description of the draft to produce.
///
/// Callers build this from whatever domain object they hold (e.g. a calendar
/// event plus its content angle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// What the post is about (usually the event title).
    pub topic: String,
    /// Human-readable category label.
    pub category_label: String,
    /// Suggested editorial angle.
    pub angle: String,
    pub channel: ContentChannel,
    /// Optional tone hint ("descontraído", "técnico", ...).
    pub tone: Option<String>,
    /// Optional date label to mention in the copy.
    pub date_label: Option<String>,
}

impl ContentRequest {
    pub fn new(topic: impl Into<String>, category_label: impl Into<String>, angle: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            category_label: category_label.into(),
            angle: angle.into(),
            channel: ContentChannel::default(),
            tone: None,
            date_label: None,
        }
    }

    pub fn with_channel(mut self, channel: ContentChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = tone.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn with_date_label(mut self, date_label: impl Into<String>) -> Self {
        self.date_label = Some(date_label.into());
        self
    }

    pub fn validate(&self) -> Result<(), AiError> {
        if self.topic.trim().is_empty() {
            return Err(AiError::InvalidInput("topic cannot be empty".to_string()));
        }
        if self.angle.trim().is_empty() {
            return Err(AiError::InvalidInput("angle cannot be empty".to_string()));
        }
        Ok(())
    }
}
