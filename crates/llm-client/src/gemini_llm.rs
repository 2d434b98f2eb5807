//! LlmClient backed by gemini-client: system turns become `systemInstruction`,
//! user/assistant turns map to `user`/`model` in order.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{Content, GeminiClient, GenerateContentRequest, DEFAULT_MODEL};
use prompt::ChatMessage;
use tracing::instrument;

use super::{non_empty, LlmClient};

/// Gemini implementation of [`LlmClient`].
#[derive(Debug, Clone)]
pub struct GeminiLlmClient {
    client: GeminiClient,
    model: String,
}

impl GeminiLlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: GeminiClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

/// Maps turns to a Gemini request. Several system turns are joined into one instruction.
pub(crate) fn to_gemini_request(messages: &[ChatMessage]) -> GenerateContentRequest {
    let mut instructions = Vec::new();
    let mut contents = Vec::with_capacity(messages.len());
    for msg in messages {
        match msg.role.gemini_role() {
            Some(role) => contents.push(Content::text(role, msg.content.clone())),
            None => instructions.push(msg.content.as_str()),
        }
    }
    GenerateContentRequest {
        contents,
        system_instruction: (!instructions.is_empty())
            .then(|| Content::instruction(instructions.join("\n\n"))),
    }
}

#[async_trait]
impl LlmClient for GeminiLlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = to_gemini_request(&messages);
        let reply = self.client.generate_text(&self.model, &request).await?;
        non_empty(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_gemini_request_lifts_system_and_keeps_order() {
        let req = to_gemini_request(&[
            ChatMessage::system("Be a tutor."),
            ChatMessage::user("2+2=?"),
            ChatMessage::assistant("4"),
            ChatMessage::user("3+3=?"),
        ]);
        let roles: Vec<_> = req.contents.iter().map(|c| c.role.clone().unwrap()).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(req.contents[2].parts[0].text.as_deref(), Some("3+3=?"));
        assert_eq!(
            req.system_instruction.unwrap().parts[0].text.as_deref(),
            Some("Be a tutor.")
        );
    }

    #[test]
    fn test_to_gemini_request_without_system() {
        let req = to_gemini_request(&[ChatMessage::user("hi")]);
        assert!(req.system_instruction.is_none());
        assert_eq!(req.contents.len(), 1);
    }
}
