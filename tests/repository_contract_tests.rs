mod common;

use chrono::{Duration, Utc};
use std::collections::BTreeMap;

use sensei_server::{
    errors::AppError,
    models::domain::{Exchange, GradedQuestion, Quiz, QuizAttempt, QuizQuestion, RefreshToken, User},
    repositories::{
        ChatHistoryRepository, QuizAttemptRepository, QuizRepository, RefreshTokenRepository,
        UserRepository,
    },
};

use common::{
    InMemoryChatHistoryRepository, InMemoryQuizAttemptRepository, InMemoryQuizRepository,
    InMemoryRefreshTokenRepository, InMemoryUserRepository,
};

fn make_question() -> QuizQuestion {
    let mut options = BTreeMap::new();
    options.insert("A".to_string(), "first".to_string());
    options.insert("B".to_string(), "second".to_string());
    QuizQuestion {
        stem: "A question".to_string(),
        options,
        correct_answer: "A".to_string(),
    }
}

fn make_quiz(id: &str, user_id: &str) -> Quiz {
    let mut quiz = Quiz::new(user_id, vec![make_question()]);
    quiz.id = id.to_string();
    quiz
}

fn make_attempt(id: &str, user_id: &str, quiz_id: &str) -> QuizAttempt {
    QuizAttempt {
        id: id.to_string(),
        user_id: user_id.to_string(),
        quiz_id: quiz_id.to_string(),
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
    }
}

#[tokio::test]
async fn chat_history_repository_appends_in_order() {
    let repo = InMemoryChatHistoryRepository::new();

    let empty = repo
        .find_by_user("user-a")
        .await
        .expect("find should work");
    assert!(empty.is_none());

    repo.append_exchange("user-a", Exchange::new("A", "first", "first reply"))
        .await
        .expect("append should work");
    repo.append_exchange("user-a", Exchange::new("A", "second", "second reply"))
        .await
        .expect("append should work");
    repo.append_exchange("user-b", Exchange::new("B", "other", "other reply"))
        .await
        .expect("append should work");

    let history = repo
        .find_by_user("user-a")
        .await
        .expect("find should work")
        .expect("history should exist");

    assert_eq!(history.user_id, "user-a");
    assert_eq!(history.history.len(), 2);
    assert_eq!(history.history[0].user_message, "first");
    assert_eq!(history.history[1].user_message, "second");

    let other = repo
        .find_by_user("user-b")
        .await
        .expect("find should work")
        .expect("history should exist");
    assert_eq!(other.history.len(), 1);
}

#[tokio::test]
async fn quiz_repository_create_find_and_duplicate_detection() {
    let repo = InMemoryQuizRepository::new();

    let quiz = make_quiz("quiz-1", "user-a");
    let created = repo.create(quiz.clone()).await.expect("create should work");
    assert_eq!(created.id, "quiz-1");

    let duplicate = repo.create(quiz.clone()).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo
        .find_by_id("quiz-1")
        .await
        .expect("find should work")
        .expect("quiz should exist");
    assert_eq!(found.user_id, "user-a");
    assert_eq!(found.questions.len(), 1);

    let missing = repo.find_by_id("quiz-missing").await.expect("find should work");
    assert!(missing.is_none());
}

#[tokio::test]
async fn quiz_attempt_repository_lists_newest_first() {
    let repo = InMemoryQuizAttemptRepository::new();

    let mut first = make_attempt("attempt-1", "user-a", "quiz-1");
    first.submitted_at = Utc::now() - Duration::minutes(10);
    let second = make_attempt("attempt-2", "user-a", "quiz-1");
    let unrelated = make_attempt("attempt-3", "user-a", "quiz-2");

    repo.create(first).await.expect("create should work");
    repo.create(second).await.expect("create should work");
    repo.create(unrelated).await.expect("create should work");

    let duplicate = repo.create(make_attempt("attempt-1", "user-a", "quiz-1")).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let attempts = repo
        .find_by_user_and_quiz("user-a", "quiz-1")
        .await
        .expect("query should work");

    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].id, "attempt-2");
    assert_eq!(attempts[1].id, "attempt-1");
}

#[tokio::test]
async fn user_repository_enforces_unique_email() {
    let repo = InMemoryUserRepository::new();

    repo.create(User::new("alice@example.com", Some("Alice")))
        .await
        .expect("create should work");

    let duplicate = repo.create(User::new("alice@example.com", None)).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo
        .find_by_email("alice@example.com")
        .await
        .expect("find should work");
    assert!(found.is_some());

    let missing = repo
        .find_by_email("bob@example.com")
        .await
        .expect("find should work");
    assert!(missing.is_none());
}

#[tokio::test]
async fn refresh_token_repository_revocation_flows() {
    let repo = InMemoryRefreshTokenRepository::new();

    let token_a1 = RefreshToken::issue("user-a", "token-a1", Utc::now() + Duration::days(7));
    let token_a2 = RefreshToken::issue("user-a", "token-a2", Utc::now() + Duration::days(7));
    let token_b = RefreshToken::issue("user-b", "token-b", Utc::now() + Duration::days(7));

    let hash_a1 = token_a1.token_hash.clone();

    repo.create(token_a1).await.expect("create should work");
    repo.create(token_a2).await.expect("create should work");
    repo.create(token_b).await.expect("create should work");

    repo.revoke_by_token_hash(&hash_a1)
        .await
        .expect("revoke should work");
    let revoked = repo
        .find_by_token_hash(&hash_a1)
        .await
        .expect("find should work")
        .expect("token should exist");
    assert!(!revoked.is_usable());

    // Only the remaining live token for user-a is revoked by logout
    let revoked_count = repo
        .revoke_all_for_user("user-a")
        .await
        .expect("revoke all should work");
    assert_eq!(revoked_count, 1);

    let other = repo
        .find_by_token_hash(&RefreshToken::hash("token-b"))
        .await
        .expect("find should work")
        .expect("token should exist");
    assert!(other.is_usable());
}

#[tokio::test]
async fn refresh_token_repository_deletes_expired() {
    let repo = InMemoryRefreshTokenRepository::new();

    let live = RefreshToken::issue("user-a", "live", Utc::now() + Duration::days(1));
    let expired = RefreshToken::issue("user-a", "expired", Utc::now() - Duration::days(1));

    repo.create(live).await.expect("create should work");
    repo.create(expired).await.expect("create should work");

    let deleted = repo.delete_expired().await.expect("delete should work");
    assert_eq!(deleted, 1);

    let remaining = repo
        .find_by_token_hash(&RefreshToken::hash("live"))
        .await
        .expect("find should work");
    assert!(remaining.is_some());

    let gone = repo
        .find_by_token_hash(&RefreshToken::hash("expired"))
        .await
        .expect("find should work");
    assert!(gone.is_none());
}
