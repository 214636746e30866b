use std::sync::Arc;

use crate::{
    auth::Claims,
    constants::prompts::{CHAT_FALLBACK_REPLY, TUTOR_SYSTEM_PROMPT},
    errors::AppResult,
    models::domain::Exchange,
    repositories::ChatHistoryRepository,
    services::model_service::CompletionModel,
};

pub struct ChatService {
    chat_history_repository: Arc<dyn ChatHistoryRepository>,
    completion_model: Arc<dyn CompletionModel>,
}

impl ChatService {
    pub fn new(
        chat_history_repository: Arc<dyn ChatHistoryRepository>,
        completion_model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            chat_history_repository,
            completion_model,
        }
    }

    /// One tutoring turn: prior exchanges are replayed into the prompt so
    /// the tutor keeps context, the reply is appended to the user's
    /// history, and the reply text is returned. An empty completion gets
    /// the fixed fallback reply instead of an error.
    pub async fn send_message(&self, claims: &Claims, message: &str) -> AppResult<String> {
        let history = self
            .chat_history_repository
            .find_by_user(&claims.sub)
            .await?
            .map(|h| h.history)
            .unwrap_or_default();

        let full_input = build_chat_input(&history, message);

        let reply = self
            .completion_model
            .complete(&full_input)
            .await?
            .unwrap_or_else(|| CHAT_FALLBACK_REPLY.to_string());

        let exchange = Exchange::new(&claims.email, message, &reply);
        self.chat_history_repository
            .append_exchange(&claims.sub, exchange)
            .await?;

        Ok(reply)
    }

    pub async fn get_history(&self, claims: &Claims) -> AppResult<Vec<Exchange>> {
        let history = self
            .chat_history_repository
            .find_by_user(&claims.sub)
            .await?
            .map(|h| h.history)
            .unwrap_or_default();

        Ok(history)
    }
}

fn build_chat_input(history: &[Exchange], message: &str) -> String {
    let mut chat_context = String::new();
    for exchange in history {
        chat_context.push_str(&format!(
            "User: {}\nAssistant: {}\n",
            exchange.user_message, exchange.assistant_response
        ));
    }

    format!(
        "{}\n\n{}\nUser: {}",
        TUTOR_SYSTEM_PROMPT, chat_context, message
    )
}
