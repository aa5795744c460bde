use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from a remote embedding or completion provider
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_error() {
        let error = DomainError::unsupported_format("notes.csv");
        assert_eq!(error.to_string(), "Unsupported file format: notes.csv");
    }

    #[test]
    fn test_io_error() {
        let error = DomainError::io("missing.txt", "No such file or directory");
        assert_eq!(
            error.to_string(),
            "I/O error on missing.txt: No such file or directory"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "Rate limit exceeded");
        assert_eq!(
            error.to_string(),
            "Provider error: openai - Rate limit exceeded"
        );
        assert!(error.is_provider());
        assert!(!DomainError::validation("x").is_provider());
    }
}
