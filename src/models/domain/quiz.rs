use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::QuizQuestion;

/// A generated quiz, owned by the user whose transcript produced it.
/// Questions (including correct answers) stay server-side; clients only
/// ever see the answer-free DTO until they submit an attempt.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(user_id: &str, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            questions,
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> i16 {
        self.questions.len() as i16
    }
}
