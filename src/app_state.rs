use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ChatHistoryRepository, MongoChatHistoryRepository, MongoQuizAttemptRepository,
        MongoQuizRepository, MongoRefreshTokenRepository, MongoUserRepository,
        QuizAttemptRepository, QuizRepository, RefreshTokenRepository, UserRepository,
    },
    services::{
        chat_service::ChatService, model_service::OpenAiCompletionModel,
        quiz_attempt_service::QuizAttemptService, quiz_service::QuizService,
        user_service::UserService, CompletionModel,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub chat_service: Arc<ChatService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub jwt_service: Arc<JwtService>,
    pub refresh_token_repository: Arc<dyn RefreshTokenRepository>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let chat_history_repository = Arc::new(MongoChatHistoryRepository::new(&db));
        chat_history_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let refresh_token_repository = Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_token_repository.ensure_indexes().await?;

        let completion_model: Arc<dyn CompletionModel> =
            Arc::new(OpenAiCompletionModel::new(&config));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        ));

        let user_service = Arc::new(UserService::new(user_repository));
        let chat_service = Arc::new(ChatService::new(
            chat_history_repository.clone(),
            completion_model.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            chat_history_repository,
            completion_model,
        ));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            attempt_repository,
        ));

        Ok(Self {
            user_service,
            chat_service,
            quiz_service,
            quiz_attempt_service,
            jwt_service,
            refresh_token_repository,
            db,
            config: Arc::new(config),
        })
    }
}
