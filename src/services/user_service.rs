use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
    models::dto::request::{LoginRequest, RegisterRequest},
    repositories::UserRepository,
};

pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "This email is already registered. Please log in.".to_string(),
            ));
        }

        let user = User::new(&request.email, request.display_name.as_deref());
        let user = self.user_repository.create(user).await?;

        log::info!("Registered new user {}", user.email);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        self.user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "No account found with this email. Please register.".to_string(),
                )
            })
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }
}
