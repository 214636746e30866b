use actix_web::{post, web, HttpResponse};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::domain::{RefreshToken, User},
    models::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest},
    models::dto::response::UserDto,
    repositories::RefreshTokenRepository,
};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let response = issue_tokens(&state, &user).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.login(request.into_inner()).await?;
    let response = issue_tokens(&state, &user).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let refresh_claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    // The signed token must also still be live in the store; logout and
    // rotation both revoke it there
    let token_hash = RefreshToken::hash(&request.refresh_token);
    let stored = state
        .refresh_token_repository
        .find_by_token_hash(&token_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Refresh token not recognized".to_string()))?;

    if !stored.is_usable() {
        return Err(AppError::Unauthorized(
            "Refresh token has been revoked or expired".to_string(),
        ));
    }

    let user = state
        .user_service
        .get_user_by_id(&refresh_claims.sub)
        .await
        .map_err(|_| {
            AppError::Unauthorized("User associated with refresh token not found".to_string())
        })?;

    // Rotate: the presented token is spent either way
    state
        .refresh_token_repository
        .revoke_by_token_hash(&token_hash)
        .await?;

    let response = issue_tokens(&state, &user).await?;

    log::info!("Token refreshed successfully for user {}", refresh_claims.sub);

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        token: response.token,
        refresh_token: response.refresh_token,
    }))
}

#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let revoked = state
        .refresh_token_repository
        .revoke_all_for_user(&auth.0.sub)
        .await?;

    log::info!("Logged out user {} ({} refresh tokens revoked)", auth.0.sub, revoked);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}

async fn issue_tokens(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state.jwt_service.create_token(user)?;

    let user_id = user
        .id
        .as_ref()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| user.email.clone());
    let refresh_token_value = state.jwt_service.create_refresh_token(&user_id)?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.refresh_expiration_hours());
    state
        .refresh_token_repository
        .create(RefreshToken::issue(&user_id, &refresh_token_value, expires_at))
        .await?;

    Ok(AuthResponse {
        token,
        refresh_token: refresh_token_value,
        user: UserDto::from(user.clone()),
    })
}
