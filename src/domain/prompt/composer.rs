//! Prompt assembly for content generation

use std::collections::HashMap;

use super::content_type::ContentType;
use super::template::render_template;
use crate::domain::DomainError;

pub const SYSTEM_PROMPT: &str = "You are an educational content creator. \
Generate accurate and clear educational materials. Make sure:
1. Content is accurate
2. Information is clear and easy to understand
3. Content fits the target audience
4. Examples are helpful
5. Content is well-organized";

const STUDY_GUIDE: &str = "Create a study guide on the given topic. Include:
- Key concepts and definitions
- Important points to remember
- Examples and applications
- Common misconceptions to avoid
- Study tips and strategies

Format the content in a clear, organized manner with headings and bullet points.";

const QUIZ: &str = "Generate a quiz on the given topic. Include:
- Multiple choice questions (at least 5)
- True/False questions (at least 3)
- Short answer questions (at least 2)
- Provide correct answers at the end

Questions should test understanding, not just memorization.";

const EXPLANATION: &str = "Provide a clear, detailed explanation of the given topic. Include:
- Definition and overview
- Key concepts explained simply
- Real-world examples or applications
- Step-by-step breakdown if applicable
- Visual descriptions or analogies

Make the explanation accessible to learners at different levels.";

const SUMMARY: &str = "Create a concise summary of the given topic. Include:
- Main points and key takeaways
- Important facts or figures
- Key relationships or connections
- Brief conclusion

Keep it short but cover the main points.";

const PRACTICE_PROBLEMS: &str = "Generate practice problems on the given topic. Include:
- Problems of varying difficulty (easy, medium, hard)
- Step-by-step solutions
- Explanations of solution methods
- Tips for solving similar problems

Problems should be practical and help build understanding.";

const CONTEXT_SECTION: &str = "\n\nRelevant Context from Knowledge Base:\n${var:context}\n\n\
Use this context to make the content accurate and relevant. \
If the context doesn't fully cover the topic, you can add your own knowledge but keep it accurate.";

const REQUIREMENTS_SECTION: &str = "\n\nAdditional Requirements:\n${var:requirements}";

const USER_PROMPT: &str = "${var:instruction}\n\nTopic: ${var:topic}\
${var:context_section:}${var:requirements_section:}\n\nGenerate the content now:";

/// Instruction block for a content type
pub fn instruction_for(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::StudyGuide => STUDY_GUIDE,
        ContentType::Quiz => QUIZ,
        ContentType::Explanation => EXPLANATION,
        ContentType::Summary => SUMMARY,
        ContentType::PracticeProblems => PRACTICE_PROBLEMS,
    }
}

/// System and user messages for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build the prompt for `topic`.
///
/// Blank context or requirements are treated as absent. Caller-supplied text
/// is substituted once and never re-expanded.
pub fn compose(
    content_type: ContentType,
    topic: &str,
    context: Option<&str>,
    requirements: Option<&str>,
) -> Result<ComposedPrompt, DomainError> {
    let context_section = match non_blank(context) {
        Some(context) => render_template(CONTEXT_SECTION, &HashMap::from([("context", context)]))?,
        None => String::new(),
    };

    let requirements_section = match non_blank(requirements) {
        Some(req) => {
            render_template(REQUIREMENTS_SECTION, &HashMap::from([("requirements", req)]))?
        }
        None => String::new(),
    };

    let values = HashMap::from([
        ("instruction", instruction_for(content_type)),
        ("topic", topic),
        ("context_section", context_section.as_str()),
        ("requirements_section", requirements_section.as_str()),
    ]);

    Ok(ComposedPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: render_template(USER_PROMPT, &values)?,
    })
}
