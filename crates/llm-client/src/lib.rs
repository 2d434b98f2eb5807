//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the tutor's response collaborator) with Gemini and
//! OpenAI-compatible implementations, and env-based configuration to pick one.
//!
//! Implementations report an empty model reply as [`LlmError::EmptyResponse`] so callers can
//! tell "no answer" apart from "could not reach the provider".

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};
use std::sync::Arc;
use thiserror::Error;

mod config;
mod gemini_llm;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, LlmProvider};
pub use gemini_llm::GeminiLlmClient;
pub use openai_llm::OpenAILlmClient;

/// Typed failures callers branch on; everything else is an opaque transport error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("Empty response from model")]
    EmptyResponse,
}

/// LLM client interface: reply text for an ordered list of turns.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for `messages` (system instruction, history, new prompt last).
    /// A blank reply is `Err(LlmError::EmptyResponse)`.
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Builds the client selected by `config`.
pub fn build_llm_client(config: &dyn LlmConfig) -> Arc<dyn LlmClient> {
    match config.provider() {
        LlmProvider::Gemini => Arc::new(
            GeminiLlmClient::with_base_url(
                config.api_key().to_string(),
                config.base_url().to_string(),
            )
            .with_model(config.model().to_string()),
        ),
        LlmProvider::OpenAI => Arc::new(
            OpenAILlmClient::with_base_url(
                config.api_key().to_string(),
                config.base_url().to_string(),
            )
            .with_model(config.model().to_string()),
        ),
    }
}

/// Rejects blank replies.
pub(crate) fn non_empty(reply: String) -> Result<String> {
    if reply.trim().is_empty() {
        return Err(LlmError::EmptyResponse.into());
    }
    Ok(reply)
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
