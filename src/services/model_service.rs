use async_openai::{
    config::OpenAIConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Narrow seam to the hosted completion endpoint: one prompt in, free text
/// out. `Ok(None)` means the endpoint answered but produced no usable text;
/// callers decide what stands in for it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<Option<String>>;
}

pub struct OpenAiCompletionModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionModel {
    pub fn new(config: &Config) -> Self {
        let openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    async fn complete(&self, prompt: &str) -> AppResult<Option<String>> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build user message: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([user_message.into()])
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build request: {}", e)))?;

        // A failed round trip is reported as absent text, same as an empty
        // choice list; callers substitute their fallback/sentinel string
        let response = match self.client.chat().create(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Completion request failed: {}", e);
                return Ok(None);
            }
        };

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty());

        Ok(text)
    }
}
