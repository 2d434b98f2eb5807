//! # Gemini API client
//!
//! Thin wrapper around the `models/{model}:generateContent` REST endpoint.
//!
//! A request is an ordered list of [`Content`] turns (`role` is `"user"` or `"model"`) plus an
//! optional system instruction. The reply text is the concatenated text parts of the first
//! candidate; an empty reply is returned as-is and left to the caller to classify.
//!
//! ## External interactions
//!
//! - **Gemini API**: HTTPS POST to `{base_url}/models/{model}:generateContent`, key in the
//!   `x-goog-api-key` header.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use tutor_core::mask_token;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// One text fragment of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One turn. `role` is absent for the system instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. Empty when there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client against a custom endpoint (proxies, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a generateContent request and returns the decoded response.
    ///
    /// Non-2xx statuses are errors carrying the provider's message when it sent one.
    #[instrument(skip(self, request), fields(turns = request.contents.len()))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        info!(
            model = %model,
            api_key = %mask_token(&self.api_key),
            has_instruction = request.system_instruction.is_some(),
            "Gemini generateContent request"
        );

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            anyhow::bail!("Gemini API error ({}): {}", status, message);
        }

        let decoded: GenerateContentResponse = response.json().await?;
        if let Some(ref u) = decoded.usage_metadata {
            info!(
                prompt_tokens = u.prompt_token_count,
                completion_tokens = u.candidates_token_count,
                total_tokens = u.total_token_count,
                "Gemini generateContent usage"
            );
        }
        Ok(decoded)
    }

    /// Convenience: the reply text of [`Self::generate_content`].
    pub async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<String> {
        Ok(self.generate_content(model, request).await?.text())
    }
}
