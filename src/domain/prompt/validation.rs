//! Topic screening before generation
//!
//! The keyword denylist is a coarse advisory filter for obviously off-topic
//! requests. It is trivially bypassed and is not a safety control.

/// Longest accepted topic, in characters
pub const MAX_TOPIC_LENGTH: usize = 2000;

/// Case-insensitive substrings that cause a topic to be rejected
pub const DENYLIST: [&str; 3] = ["violence", "illegal", "harmful"];

pub const EMPTY_TOPIC_MESSAGE: &str = "Please provide a topic or question.";
pub const TOPIC_TOO_LONG_MESSAGE: &str =
    "Input is too long. Please provide a more concise topic (under 2000 characters).";
pub const INAPPROPRIATE_TOPIC_MESSAGE: &str =
    "Please make sure your topic is appropriate for educational content.";

/// Returns a user-facing message when the topic should not be sent to the model
pub fn validate_topic(topic: &str) -> Option<&'static str> {
    if topic.trim().is_empty() {
        return Some(EMPTY_TOPIC_MESSAGE);
    }

    if topic.chars().count() > MAX_TOPIC_LENGTH {
        return Some(TOPIC_TOO_LONG_MESSAGE);
    }

    let lowered = topic.to_lowercase();
    if DENYLIST.iter().any(|keyword| lowered.contains(keyword)) {
        return Some(INAPPROPRIATE_TOPIC_MESSAGE);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_topic() {
        assert_eq!(validate_topic("Photosynthesis"), None);
        assert_eq!(validate_topic(&"a".repeat(MAX_TOPIC_LENGTH)), None);
    }

    #[test]
    fn test_empty_topic() {
        assert_eq!(validate_topic(""), Some(EMPTY_TOPIC_MESSAGE));
        assert_eq!(validate_topic("  \t\n"), Some(EMPTY_TOPIC_MESSAGE));
    }

    #[test]
    fn test_topic_too_long() {
        assert_eq!(
            validate_topic(&"a".repeat(MAX_TOPIC_LENGTH + 1)),
            Some(TOPIC_TOO_LONG_MESSAGE)
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert_eq!(validate_topic(&"é".repeat(MAX_TOPIC_LENGTH)), None);
    }

    #[test]
    fn test_denylisted_keyword_any_case() {
        assert_eq!(
            validate_topic("History of VIOLENCE in film"),
            Some(INAPPROPRIATE_TOPIC_MESSAGE)
        );
        assert_eq!(
            validate_topic("illegalities"),
            Some(INAPPROPRIATE_TOPIC_MESSAGE)
        );
    }
}
