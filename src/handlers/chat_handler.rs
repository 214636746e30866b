use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::ChatRequest,
    models::dto::response::{ChatReplyDto, ExchangeDto},
};

#[post("/chat")]
pub async fn send_message(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let reply = state
        .chat_service
        .send_message(&auth.0, &request.message)
        .await?;

    Ok(HttpResponse::Ok().json(ChatReplyDto { reply }))
}

#[get("/chat/history")]
pub async fn get_chat_history(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let history = state.chat_service.get_history(&auth.0).await?;

    let exchanges: Vec<ExchangeDto> = history.into_iter().map(ExchangeDto::from).collect();
    Ok(HttpResponse::Ok().json(exchanges))
}
