use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Exchange, GradedQuestion, Quiz, QuizAttempt, QuizQuestion, User};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct UserDto {
    pub email: String,
    pub display_name: Option<String>,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ExchangeDto {
    pub speaker_label: String,
    pub user_message: String,
    pub assistant_response: String,
}

impl From<Exchange> for ExchangeDto {
    fn from(exchange: Exchange) -> Self {
        ExchangeDto {
            speaker_label: exchange.speaker_label,
            user_message: exchange.user_message,
            assistant_response: exchange.assistant_response,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ChatReplyDto {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizOptionDto {
    pub letter: String,
    pub text: String,
}

/// Question as shown to the quiz taker: the correct answer never leaves
/// the server through this type.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizQuestionDto {
    pub stem: String,
    pub options: Vec<QuizOptionDto>,
}

impl From<&QuizQuestion> for QuizQuestionDto {
    fn from(question: &QuizQuestion) -> Self {
        QuizQuestionDto {
            stem: question.stem.clone(),
            options: question
                .options
                .iter()
                .map(|(letter, text)| QuizOptionDto {
                    letter: letter.clone(),
                    text: text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizDto {
    pub id: String,
    pub question_count: i16,
    pub questions: Vec<QuizQuestionDto>,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id.clone(),
            question_count: quiz.question_count(),
            questions: quiz.questions.iter().map(QuizQuestionDto::from).collect(),
            created_at: quiz.created_at,
        }
    }
}

/// Post-submission review entry: the correct letter is revealed along with
/// the full option list so the client can render the original review screen.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GradedQuestionDto {
    pub question_index: i16,
    pub stem: String,
    pub options: Vec<QuizOptionDto>,
    pub user_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizResultDto {
    pub quiz_id: String,
    pub score: i16,
    pub total_questions: i16,
    pub results: Vec<GradedQuestionDto>,
}

impl QuizResultDto {
    pub fn from_attempt(quiz: &Quiz, attempt: &QuizAttempt) -> Self {
        QuizResultDto {
            quiz_id: quiz.id.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions,
            results: attempt
                .question_results
                .iter()
                .map(|graded| graded_question_dto(quiz, graded))
                .collect(),
        }
    }
}

fn graded_question_dto(quiz: &Quiz, graded: &GradedQuestion) -> GradedQuestionDto {
    let question = quiz.questions.get(graded.question_index as usize);

    GradedQuestionDto {
        question_index: graded.question_index,
        stem: question.map(|q| q.stem.clone()).unwrap_or_default(),
        options: question
            .map(|q| {
                q.options
                    .iter()
                    .map(|(letter, text)| QuizOptionDto {
                        letter: letter.clone(),
                        text: text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        user_answer: graded.user_answer.clone(),
        correct_answer: graded.correct_answer.clone(),
        is_correct: graded.is_correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_quiz() -> Quiz {
        let mut options = BTreeMap::new();
        options.insert("A".to_string(), "Yes".to_string());
        options.insert("B".to_string(), "No".to_string());
        Quiz::new(
            "user-1",
            vec![QuizQuestion {
                stem: "Is Rust memory safe?".to_string(),
                options,
                correct_answer: "A".to_string(),
            }],
        )
    }

    #[test]
    fn quiz_dto_excludes_correct_answers() {
        let quiz = sample_quiz();
        let dto = QuizDto::from(quiz);

        let json = serde_json::to_string(&dto).expect("dto should serialize");
        assert!(!json.contains("correct_answer"));
        assert_eq!(dto.question_count, 1);
        assert_eq!(dto.questions[0].options.len(), 2);
    }

    #[test]
    fn result_dto_reveals_correct_letter_and_options() {
        let quiz = sample_quiz();
        let attempt = QuizAttempt {
            id: "attempt-1".to_string(),
            user_id: "user-1".to_string(),
            quiz_id: quiz.id.clone(),
            score: 1,
            total_questions: 1,
            question_results: vec![GradedQuestion {
                question_index: 0,
                user_answer: Some("A".to_string()),
                correct_answer: Some("A".to_string()),
                is_correct: true,
            }],
            submitted_at: Utc::now(),
            created_at: Some(Utc::now()),
        };

        let dto = QuizResultDto::from_attempt(&quiz, &attempt);
        assert_eq!(dto.score, 1);
        assert_eq!(dto.results[0].correct_answer.as_deref(), Some("A"));
        assert_eq!(dto.results[0].stem, "Is Rust memory safe?");
        assert_eq!(dto.results[0].options.len(), 2);
    }
}
