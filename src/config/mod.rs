mod app_config;

pub use app_config::{
    AppConfig, CompletionConfig, EmbeddingConfig, KnowledgeBaseBackend, KnowledgeBaseConfig,
    LogFormat, LoggingConfig, OpenAiConfig, OPENAI_API_KEY_ENV,
};
