//! Prompt composition for educational content

pub mod composer;
pub mod content_type;
pub mod outcome;
pub mod template;
pub mod validation;

pub use composer::{compose, instruction_for, ComposedPrompt, SYSTEM_PROMPT};
pub use content_type::ContentType;
pub use outcome::{ContentRequest, GenerationOutcome, GenerationResult};
pub use template::{render_template, PromptTemplate, PromptVariable, TemplateError};
pub use validation::{validate_topic, DENYLIST, MAX_TOPIC_LENGTH};
