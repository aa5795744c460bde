//! Kinds of educational content

use serde::{Deserialize, Serialize};
use std::fmt;

/// Educational content formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    StudyGuide,
    Quiz,
    Explanation,
    Summary,
    PracticeProblems,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::StudyGuide,
        ContentType::Quiz,
        ContentType::Explanation,
        ContentType::Summary,
        ContentType::PracticeProblems,
    ];

    /// Map a key such as `study_guide` to a content type.
    ///
    /// Unknown keys fall back to `Explanation`.
    pub fn parse(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key.trim())
            .unwrap_or(ContentType::Explanation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudyGuide => "study_guide",
            Self::Quiz => "quiz",
            Self::Explanation => "explanation",
            Self::Summary => "summary",
            Self::PracticeProblems => "practice_problems",
        }
    }

    /// Title-cased label, e.g. `Practice Problems`
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::StudyGuide => "Study Guide",
            Self::Quiz => "Quiz",
            Self::Explanation => "Explanation",
            Self::Summary => "Summary",
            Self::PracticeProblems => "Practice Problems",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        for content_type in ContentType::ALL {
            assert_eq!(ContentType::parse(content_type.as_str()), content_type);
        }
    }

    #[test]
    fn test_parse_unknown_falls_back_to_explanation() {
        assert_eq!(ContentType::parse("poem"), ContentType::Explanation);
        assert_eq!(ContentType::parse(""), ContentType::Explanation);
        assert_eq!(ContentType::parse("QUIZ"), ContentType::Explanation);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(ContentType::PracticeProblems.display_name(), "Practice Problems");
        assert_eq!(ContentType::StudyGuide.to_string(), "study_guide");
    }
}
