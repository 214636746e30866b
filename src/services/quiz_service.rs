use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    auth::{require_owner, Claims},
    constants::prompts::{NO_QUIZ_SENTINEL, QUIZ_PROMPT_FORMAT, QUIZ_PROMPT_INTRO},
    errors::{AppError, AppResult},
    models::domain::{Exchange, Quiz, QuizQuestion},
    repositories::{ChatHistoryRepository, QuizRepository},
    services::model_service::CompletionModel,
};

/// Alternate question header emitted by some completions, e.g.
/// "Question 3: ..." instead of "QUESTION: ...".
static QUESTION_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Question \d+").expect("question pattern is a valid regex"));

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    chat_history_repository: Arc<dyn ChatHistoryRepository>,
    completion_model: Arc<dyn CompletionModel>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        chat_history_repository: Arc<dyn ChatHistoryRepository>,
        completion_model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            quiz_repository,
            chat_history_repository,
            completion_model,
        }
    }

    /// Generate a quiz from the caller's current transcript snapshot and
    /// persist it. The parse may recover fewer than the 5 requested
    /// questions; zero surviving questions is reported as "quiz
    /// unavailable" rather than returning an empty quiz.
    pub async fn generate_quiz(&self, claims: &Claims) -> AppResult<Quiz> {
        let exchanges = self
            .chat_history_repository
            .find_by_user(&claims.sub)
            .await?
            .map(|h| h.history)
            .unwrap_or_default();

        if exchanges.is_empty() {
            return Err(AppError::ValidationError(
                "Chat history is empty. Chat with the tutor before taking a quiz.".to_string(),
            ));
        }

        let prompt = build_quiz_prompt(&exchanges);
        let quiz_text = self
            .completion_model
            .complete(&prompt)
            .await?
            .unwrap_or_else(|| NO_QUIZ_SENTINEL.to_string());

        let questions = parse_quiz_questions(&quiz_text);
        if questions.is_empty() {
            log::warn!("Quiz generation produced no usable questions for user {}", claims.sub);
            return Err(AppError::CompletionError(
                "Unable to generate quiz questions. Continue chatting to build more context."
                    .to_string(),
            ));
        }

        let quiz = Quiz::new(&claims.sub, questions);
        self.quiz_repository.create(quiz.clone()).await?;

        Ok(quiz)
    }

    pub async fn get_quiz_for_user(&self, id: &str, claims: &Claims) -> AppResult<Quiz> {
        let quiz = self
            .quiz_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        require_owner(claims, &quiz.user_id)?;

        Ok(quiz)
    }
}

/// Render the transcript and embed it in the fixed instructional template.
/// An empty transcript still yields a well-formed prompt; guarding against
/// it is the caller's job.
pub fn build_quiz_prompt(exchanges: &[Exchange]) -> String {
    let chat_context = exchanges
        .iter()
        .map(|e| format!("User: {}\nAI: {}", e.user_message, e.assistant_response))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nChat History:\n{}\n\nFormat each question as:\n{}",
        QUIZ_PROMPT_INTRO, chat_context, QUIZ_PROMPT_FORMAT
    )
}

/// Extract structured questions from free completion text.
///
/// Single forward pass over trimmed lines: a question header opens an
/// accumulator, option/answer markers fill it, anything else is ignored.
/// Completions vary their option punctuation, so `A)`, `A.` and `(A)` are
/// all recognized. Accumulated questions missing a stem or all options are
/// dropped by the final filter; one malformed question never fails the
/// quiz. The sentinel text contains no markers and parses to an empty list.
pub fn parse_quiz_questions(raw_text: &str) -> Vec<QuizQuestion> {
    let mut questions: Vec<QuizQuestion> = Vec::new();
    let mut current: Option<QuizQuestion> = None;

    for line in raw_text.trim().lines() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with("QUESTION:") || QUESTION_NUMBER_RE.is_match(line) {
            if let Some(question) = current.take() {
                questions.push(question);
            }

            let mut question = QuizQuestion::empty();
            question.stem = extract_stem(line);
            current = Some(question);
        } else if let Some(question) = current.as_mut() {
            if let Some(letter) = option_marker(line) {
                question
                    .options
                    .insert(letter.to_string(), option_text(line));
            } else if line.starts_with("ANSWER:") || line.starts_with("Answer:") {
                if let Some((_, answer)) = line.split_once(':') {
                    question.correct_answer = answer.trim().to_string();
                }
            }
        }
    }

    if let Some(question) = current.take() {
        questions.push(question);
    }

    questions
        .into_iter()
        .filter(QuizQuestion::is_complete)
        .collect()
}

fn extract_stem(line: &str) -> String {
    if let Some((_, stem)) = line.split_once(':') {
        return stem.trim().to_string();
    }

    // Headers like "Question 1 What is ..." carry the stem after the
    // first two tokens
    let parts: Vec<&str> = line.splitn(3, ' ').collect();
    if parts.len() >= 3 {
        parts[2].trim().to_string()
    } else {
        line.to_string()
    }
}

fn option_marker(line: &str) -> Option<char> {
    for letter in ['A', 'B', 'C', 'D'] {
        if line.starts_with(&format!("{})", letter))
            || line.starts_with(&format!("{}.", letter))
            || line.starts_with(&format!("({})", letter))
        {
            return Some(letter);
        }
    }
    None
}

fn option_text(line: &str) -> String {
    if let Some(index) = line.find(')') {
        line[index + 1..].trim().to_string()
    } else if let Some(index) = line.find('.') {
        line[index + 1..].trim().to_string()
    } else {
        String::new()
    }
}
