use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::domain::{GradedQuestion, Quiz, QuizAttempt, QuizQuestion},
    repositories::{QuizAttemptRepository, QuizRepository},
};

pub struct QuizAttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
        }
    }

    async fn owned_quiz(&self, claims: &Claims, quiz_id: &str) -> AppResult<Quiz> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        require_owner(claims, &quiz.user_id)?;
        Ok(quiz)
    }

    /// Grade submitted answers against the stored quiz and persist the
    /// attempt.
    pub async fn submit_attempt(
        &self,
        claims: &Claims,
        quiz_id: &str,
        answers: &HashMap<usize, String>,
    ) -> AppResult<(Quiz, QuizAttempt)> {
        let quiz = self.owned_quiz(claims, quiz_id).await?;

        let (score, question_results) = Self::grade_submission(&quiz.questions, answers);
        let attempt = Self::create_attempt(&claims.sub, &quiz, score, question_results);

        let attempt = self.attempt_repository.create(attempt).await?;
        Ok((quiz, attempt))
    }

    pub async fn attempts_for_quiz(
        &self,
        claims: &Claims,
        quiz_id: &str,
    ) -> AppResult<(Quiz, Vec<QuizAttempt>)> {
        let quiz = self.owned_quiz(claims, quiz_id).await?;

        let attempts = self
            .attempt_repository
            .find_by_user_and_quiz(&claims.sub, quiz_id)
            .await?;

        Ok((quiz, attempts))
    }

    /// Grade answers against questions, in question order. A question
    /// counts as correct only when an answer was submitted for its index
    /// and matches the normalized letter exactly; a question whose raw
    /// answer normalizes to nothing can never be correct.
    pub fn grade_submission(
        questions: &[QuizQuestion],
        answers: &HashMap<usize, String>,
    ) -> (i16, Vec<GradedQuestion>) {
        let mut score: i16 = 0;
        let mut question_results = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            let correct_answer = question.normalized_answer();
            let user_answer = answers.get(&index).cloned();

            let is_correct = match (&user_answer, &correct_answer) {
                (Some(user), Some(correct)) => user == correct,
                _ => false,
            };

            if is_correct {
                score += 1;
            }

            question_results.push(GradedQuestion {
                question_index: index as i16,
                user_answer,
                correct_answer,
                is_correct,
            });
        }

        (score, question_results)
    }

    pub fn create_attempt(
        user_id: &str,
        quiz: &Quiz,
        score: i16,
        question_results: Vec<GradedQuestion>,
    ) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz.id.clone(),
            score,
            total_questions: quiz.question_count(),
            question_results,
            submitted_at: Utc::now(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn question(correct_answer: &str) -> QuizQuestion {
        let mut options = BTreeMap::new();
        options.insert("A".to_string(), "first".to_string());
        options.insert("B".to_string(), "second".to_string());
        options.insert("C".to_string(), "third".to_string());
        options.insert("D".to_string(), "fourth".to_string());
        QuizQuestion {
            stem: "A question".to_string(),
            options,
            correct_answer: correct_answer.to_string(),
        }
    }

    fn answers(entries: &[(usize, &str)]) -> HashMap<usize, String> {
        entries
            .iter()
            .map(|(index, letter)| (*index, letter.to_string()))
            .collect()
    }

    #[test]
    fn grades_known_answer_key() {
        let questions = vec![
            question("A"),
            question("B"),
            question("C"),
            question("D"),
            question("A"),
        ];
        let submitted = answers(&[(0, "A"), (1, "C"), (2, "C"), (3, "D"), (4, "B")]);

        let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(score, 3);
        let correctness: Vec<bool> = results.iter().map(|r| r.is_correct).collect();
        assert_eq!(correctness, vec![true, false, true, true, false]);
    }

    #[test]
    fn results_preserve_question_order_and_indices() {
        let questions = vec![question("A"), question("B")];
        let submitted = answers(&[(1, "B")]);

        let (_, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].question_index, 0);
        assert_eq!(results[1].question_index, 1);
    }

    #[test]
    fn unanswered_question_is_incorrect() {
        let questions = vec![question("A")];
        let submitted = answers(&[]);

        let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(score, 0);
        assert!(results[0].user_answer.is_none());
        assert_eq!(results[0].correct_answer.as_deref(), Some("A"));
        assert!(!results[0].is_correct);
    }

    #[test]
    fn verbose_answer_string_is_normalized_before_comparison() {
        let questions = vec![question("B) second")];
        let submitted = answers(&[(0, "B")]);

        let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(score, 1);
        assert_eq!(results[0].correct_answer.as_deref(), Some("B"));
        assert!(results[0].is_correct);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let questions = vec![question("a")];
        let submitted = answers(&[(0, "A")]);

        let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(score, 0);
        assert_eq!(results[0].correct_answer.as_deref(), Some("a"));
        assert!(!results[0].is_correct);
    }

    // A question whose raw answer is empty is unscorable: no submitted
    // letter can ever match it
    #[test]
    fn empty_answer_question_is_always_incorrect() {
        let questions = vec![question("")];

        for letter in ["A", "B", "C", "D"] {
            let submitted = answers(&[(0, letter)]);
            let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

            assert_eq!(score, 0);
            assert!(results[0].correct_answer.is_none());
            assert!(!results[0].is_correct);
        }
    }

    #[test]
    fn out_of_range_answer_indices_are_ignored() {
        let questions = vec![question("A")];
        let submitted = answers(&[(0, "A"), (7, "B")]);

        let (score, results) = QuizAttemptService::grade_submission(&questions, &submitted);

        assert_eq!(score, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn create_attempt_carries_quiz_shape() {
        let quiz = Quiz::new("user-1", vec![question("A"), question("B")]);
        let submitted = answers(&[(0, "A"), (1, "B")]);
        let (score, results) = QuizAttemptService::grade_submission(&quiz.questions, &submitted);

        let attempt = QuizAttemptService::create_attempt("user-1", &quiz, score, results);

        assert_eq!(attempt.quiz_id, quiz.id);
        assert_eq!(attempt.score, 2);
        assert_eq!(attempt.total_questions, 2);
        assert_eq!(attempt.question_results.len(), 2);
    }
}
