pub mod auth_handler;
pub mod chat_handler;
pub mod quiz_handler;
pub mod user_handler;

pub use auth_handler::{login, logout, refresh_token, register};
pub use chat_handler::{get_chat_history, send_message};
pub use quiz_handler::{generate_quiz, get_quiz, list_quiz_attempts, submit_quiz_attempt};
pub use user_handler::{get_me, health_check, health_check_live, health_check_ready};
