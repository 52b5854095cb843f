//! Topic explanations from a hosted chat-completion model.

use std::time::Duration;

use anyhow::{Result, anyhow};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

/// A client able to answer a single prompt with text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExplanationClient: Send + Sync {
    async fn complete(&self, prompt: String) -> Result<String>;
}

/// An implementation of `ExplanationClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a client for an OpenAI-compatible service.
    ///
    /// * `api_base` - Base URL ending in `/v1`.
    /// * `api_key` - Bearer token. May be empty; the service then rejects requests.
    /// * `model` - Model identifier used for chat completions.
    pub fn new(api_base: &str, api_key: &str, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        // Exactly one request per explanation; failed requests are not retried.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: Client::with_config(config).with_backoff(no_retry),
            model,
        }
    }
}

#[async_trait]
impl ExplanationClient for OpenAICompatibleClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("response contained no message content"))?;

        Ok(content)
    }
}

pub fn explanation_prompt(topic: &str) -> String {
    format!(
        "Write a simple 100-word explanation for office employees about the topic '{}'. \
         Focus on workplace safety and sustainability.",
        topic
    )
}

pub fn fallback_message(err: &anyhow::Error) -> String {
    format!("⚠️ Failed to generate explanation: {}", err)
}

/// Asks the model for a short explanation of `topic`.
///
/// Never fails: any error is turned into a displayable fallback message.
pub async fn generate_explanation(client: &dyn ExplanationClient, topic: &str) -> String {
    match client.complete(explanation_prompt(topic)).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => fallback_message(&anyhow!("the model returned an empty response")),
        Err(e) => {
            tracing::warn!(topic, error = %e, "Explanation request failed");
            fallback_message(&e)
        }
    }
}
