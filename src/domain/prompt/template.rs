//! Prompt template parsing and rendering
//!
//! Supports variable syntax:
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Rendering is a single pass over the template text: substituted values are
//! never scanned again, so a value that itself looks like `${var:...}` is
//! emitted verbatim.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::domain::DomainError;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("variable pattern is a valid regex")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// A variable referenced by a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and collect its variables, first occurrence wins
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut seen = HashSet::new();
        let mut variables = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();
            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    pub fn required_variables(&self) -> Vec<&PromptVariable> {
        self.variables.iter().filter(|v| v.is_required()).collect()
    }

    /// Substitute every variable occurrence with its value or default
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            match values.get(&cap[1]) {
                Some(value) => value.to_string(),
                None => cap.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}

/// Parse and render a template string in one step
pub fn render_template(
    template: &str,
    values: &HashMap<&str, &str>,
) -> Result<String, TemplateError> {
    PromptTemplate::parse(template).render(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let template =
            PromptTemplate::parse("${var:topic} ${var:tone:friendly} ${var:topic} ${var:level_2}");

        assert_eq!(template.variables().len(), 3);
        assert_eq!(template.variables()[0].name, "topic");
        assert!(template.variables()[0].is_required());
        assert_eq!(template.variables()[1].default.as_deref(), Some("friendly"));
        assert_eq!(template.variables()[2].name, "level_2");
        assert_eq!(template.required_variables().len(), 2);
    }

    #[test]
    fn test_render_values_and_defaults() {
        let values = HashMap::from([("name", "Ada")]);

        let rendered =
            render_template("Hello ${var:name}, you are ${var:role:a student}.", &values).unwrap();

        assert_eq!(rendered, "Hello Ada, you are a student.");
    }

    #[test]
    fn test_render_empty_default() {
        let rendered = render_template("Value:${var:optional:}", &HashMap::new()).unwrap();
        assert_eq!(rendered, "Value:");
    }

    #[test]
    fn test_render_missing_required_variable() {
        let result = render_template("Topic: ${var:topic}", &HashMap::new());

        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "topic".to_string()
            })
        );
    }

    #[test]
    fn test_render_is_single_pass() {
        let values = HashMap::from([("a", "${var:b}"), ("b", "expanded")]);

        let rendered = render_template("${var:a} and ${var:b}", &values).unwrap();

        assert_eq!(rendered, "${var:b} and expanded");
    }

    #[test]
    fn test_render_repeated_variable() {
        let values = HashMap::from([("x", "1")]);
        assert_eq!(render_template("${var:x}+${var:x}", &values).unwrap(), "1+1");
    }
}
