use std::collections::HashMap;

use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

/// REST submission body: question index mapped to the selected letter.
/// Indices missing from the map are graded as unanswered.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizAttemptRequest {
    pub answers: HashMap<usize, String>,
}

/// GraphQL flavor of a submitted answer (the schema has no map type).
#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct QuestionAnswerInput {
    pub question_index: i32,
    pub selected_option: String,
}

pub fn answers_to_map(answers: Vec<QuestionAnswerInput>) -> HashMap<usize, String> {
    answers
        .into_iter()
        .filter(|a| a.question_index >= 0)
        .map(|a| (a.question_index as usize, a.selected_option))
        .collect()
}
