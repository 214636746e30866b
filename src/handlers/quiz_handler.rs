use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::SubmitQuizAttemptRequest,
    models::dto::response::{QuizDto, QuizResultDto},
};

#[post("/quizzes")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.generate_quiz(&auth.0).await?;
    Ok(HttpResponse::Created().json(QuizDto::from(quiz)))
}

#[get("/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_for_user(&id, &auth.0).await?;
    Ok(HttpResponse::Ok().json(QuizDto::from(quiz)))
}

#[post("/quizzes/{id}/attempts")]
pub async fn submit_quiz_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizAttemptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, attempt) = state
        .quiz_attempt_service
        .submit_attempt(&auth.0, &id, &request.answers)
        .await?;

    Ok(HttpResponse::Created().json(QuizResultDto::from_attempt(&quiz, &attempt)))
}

#[get("/quizzes/{id}/attempts")]
pub async fn list_quiz_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, attempts) = state
        .quiz_attempt_service
        .attempts_for_quiz(&auth.0, &id)
        .await?;

    let results: Vec<QuizResultDto> = attempts
        .iter()
        .map(|attempt| QuizResultDto::from_attempt(&quiz, attempt))
        .collect();

    Ok(HttpResponse::Ok().json(results))
}
