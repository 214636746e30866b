pub mod chat_service;
pub mod model_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod user_service;

pub use chat_service::ChatService;
pub use model_service::{CompletionModel, OpenAiCompletionModel};
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
