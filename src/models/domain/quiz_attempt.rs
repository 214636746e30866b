use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: i16,
    pub total_questions: i16,
    pub question_results: Vec<GradedQuestion>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Grading record for a single question, in question order.
/// `correct_answer` holds the normalized letter; `None` marks a question
/// whose raw answer was empty and therefore unmatchable.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradedQuestion {
    pub question_index: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}
