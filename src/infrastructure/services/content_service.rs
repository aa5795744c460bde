//! Educational content generation on top of a completion provider

use std::sync::Arc;

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::prompt::{
    compose, validate_topic, ContentRequest, ContentType, GenerationOutcome, GenerationResult,
};
use crate::domain::DomainError;

use super::rag_service::RagService;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Composes prompts, optionally grounded in retrieved context, and asks the
/// completion provider for content
pub struct ContentService {
    llm: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    rag: Arc<RagService>,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("llm", &self.llm.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ContentService {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>, rag: Arc<RagService>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            rag,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One completion call; failures come back as [`GenerationOutcome::Failed`]
    pub async fn generate_content(
        &self,
        content_type: ContentType,
        topic: &str,
        context: Option<&str>,
        requirements: Option<&str>,
    ) -> GenerationOutcome {
        let prompt = match compose(content_type, topic, context, requirements) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compose prompt");
                return GenerationOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        let request = LlmRequest::builder()
            .system(prompt.system)
            .user(prompt.user)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build();

        match self.llm.chat(&self.model, request).await {
            Ok(response) => {
                tracing::info!(
                    content_type = content_type.as_str(),
                    model = %response.model,
                    with_context = context.is_some(),
                    "Generated content"
                );

                GenerationOutcome::Generated {
                    text: response.content().to_string(),
                    model: response.model.clone(),
                    usage: response.usage.clone(),
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.llm.provider_name(),
                    error = %e,
                    "Completion request failed"
                );

                GenerationOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Retrieve context for `topic`, then generate.
    ///
    /// Retrieval errors propagate; completion errors are folded into the outcome.
    pub async fn generate_with_rag(
        &self,
        content_type: ContentType,
        topic: &str,
        requirements: Option<&str>,
    ) -> Result<GenerationResult, DomainError> {
        let context = self.rag.context_for(topic, self.rag.top_k()).await?;

        if context.is_none() {
            tracing::debug!(topic, "No context found, generating without retrieval");
        }

        let content = self
            .generate_content(content_type, topic, context.as_deref(), requirements)
            .await;

        Ok(GenerationResult {
            content,
            context_used: context,
            content_type,
            topic: topic.to_string(),
        })
    }

    /// Screen the topic, then generate with or without retrieval
    pub async fn generate(&self, request: ContentRequest) -> Result<GenerationResult, DomainError> {
        let ContentRequest {
            content_type,
            topic,
            additional_requirements,
            use_retrieval,
        } = request;

        if let Some(message) = validate_topic(&topic) {
            tracing::info!(content_type = content_type.as_str(), "Topic rejected");
            return Ok(GenerationResult {
                content: GenerationOutcome::Rejected {
                    message: message.to_string(),
                },
                context_used: None,
                content_type,
                topic,
            });
        }

        let requirements = additional_requirements.as_deref();

        if use_retrieval {
            return self.generate_with_rag(content_type, &topic, requirements).await;
        }

        let content = self
            .generate_content(content_type, &topic, None, requirements)
            .await;

        Ok(GenerationResult {
            content,
            context_used: None,
            content_type,
            topic,
        })
    }
}
