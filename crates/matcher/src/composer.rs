use crate::classifier::{CategoryClassifier, Topic};
use crate::selector::{MatchResult, Selection};
use serde::Serialize;

pub const EMPTY_QUERY_PROMPT: &str =
    "Please ask me a legal question, and I'll do my best to help you.";

pub const REPHRASE_PROMPT: &str =
    "I didn't quite understand that. Could you please rephrase your question?";

const FALLBACK_OPENING: &str =
    "I don't have a specific answer for that question in my knowledge base. ";

const FALLBACK_TOPICS: [&str; 6] = [
    "Consumer rights and product issues",
    "Tenant and landlord disputes",
    "Employee rights and workplace issues",
    "Women's rights and safety",
    "Cyber crimes and online privacy",
    "General legal procedures",
];

const FALLBACK_CLOSING: &str = "Try asking a more specific question, or explore the Legal Rights Hub for detailed information.";

/// How a response was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    EmptyInput,
    Ambiguous,
    Matched { record_id: u32, score: f64 },
    Fallback { category: Option<Topic> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub outcome: Outcome,
    #[serde(rename = "response")]
    pub text: String,
}

pub struct ResponseComposer;

impl ResponseComposer {
    #[must_use]
    pub fn empty_input() -> Response {
        Response {
            outcome: Outcome::EmptyInput,
            text: EMPTY_QUERY_PROMPT.to_string(),
        }
    }

    /// Render a selection. The classifier only runs when nothing qualified.
    #[must_use]
    pub fn compose(selection: &Selection<'_>) -> Response {
        match selection {
            Selection::Ambiguous => Response {
                outcome: Outcome::Ambiguous,
                text: REPHRASE_PROMPT.to_string(),
            },
            Selection::Scored {
                result: MatchResult::Matched { record, score },
                ..
            } => Response {
                outcome: Outcome::Matched {
                    record_id: record.id,
                    score: *score,
                },
                text: record.answer.clone(),
            },
            Selection::Scored {
                query,
                result: MatchResult::NoMatch,
            } => {
                let category = CategoryClassifier::classify(&query.keywords);
                Response {
                    outcome: Outcome::Fallback { category },
                    text: Self::fallback_text(category),
                }
            }
        }
    }

    #[must_use]
    pub fn fallback_text(category: Option<Topic>) -> String {
        let mut text = String::from(FALLBACK_OPENING);
        if let Some(topic) = category {
            text.push_str(&format!("However, this seems related to {topic}. "));
        }
        text.push_str("\n\nHere are some things I can help you with:\n");
        for topic in FALLBACK_TOPICS {
            text.push_str("• ");
            text.push_str(topic);
            text.push('\n');
        }
        text.push('\n');
        text.push_str(FALLBACK_CLOSING);
        text
    }
}
