//! Generation requests and their results

use serde::{Deserialize, Serialize};

use super::content_type::ContentType;
use crate::domain::llm::Usage;

/// What came back from a generation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The model produced content
    Generated {
        text: String,
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },
    /// The topic failed screening; nothing was sent to the model
    Rejected { message: String },
    /// The completion provider failed
    Failed { message: String },
}

impl GenerationOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    /// User-facing text for any outcome
    pub fn display_text(&self) -> String {
        match self {
            Self::Generated { text, .. } => text.clone(),
            Self::Rejected { message } => message.clone(),
            Self::Failed { message } => format!(
                "Error generating content: {}. Please check your API key and try again.",
                message
            ),
        }
    }
}

/// A request for educational content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content_type: ContentType,
    pub topic: String,
    pub additional_requirements: Option<String>,
    pub use_retrieval: bool,
}

impl ContentRequest {
    /// New request; retrieval is on by default
    pub fn new(content_type: ContentType, topic: impl Into<String>) -> Self {
        Self {
            content_type,
            topic: topic.into(),
            additional_requirements: None,
            use_retrieval: true,
        }
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.additional_requirements = Some(requirements.into());
        self
    }

    pub fn with_retrieval(mut self, use_retrieval: bool) -> Self {
        self.use_retrieval = use_retrieval;
        self
    }
}

/// Outcome plus the context that informed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: GenerationOutcome,
    /// Formatted context, absent when retrieval was off or found nothing
    pub context_used: Option<String>,
    pub content_type: ContentType,
    pub topic: String,
}
