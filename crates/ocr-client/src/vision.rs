//! Cloud Vision REST client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use tutor_core::mask_token;

use crate::response::{interpret, BatchAnnotateImagesResponse};
use crate::{ExtractionResult, TextExtractor};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for `images:annotate` with `TEXT_DETECTION`.
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    /// Client against a custom endpoint (proxies, test servers).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            endpoint,
        }
    }

    /// Posts one base64 image with a text-detection feature and decodes the batch response.
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn annotate(&self, image: &[u8]) -> anyhow::Result<BatchAnnotateImagesResponse> {
        info!(api_key = %mask_token(&self.api_key), "Vision images:annotate request");

        let body = json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION", "maxResults": 1 }]
            }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            anyhow::bail!("Vision API error ({}): {}", status, message);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextExtractor for VisionClient {
    async fn extract(&self, image: &[u8]) -> ExtractionResult {
        if image.is_empty() {
            return ExtractionResult::Failed("No image provided".to_string());
        }
        match self.annotate(image).await {
            Ok(batch) => {
                let result = interpret(&batch);
                match &result {
                    ExtractionResult::Text(text) => info!(text_len = text.len(), "Text extracted"),
                    ExtractionResult::NoText => info!("No text detected"),
                    ExtractionResult::Failed(message) => warn!(%message, "Vision reported an error"),
                }
                result
            }
            Err(e) => {
                warn!(error = %e, "Vision request failed");
                ExtractionResult::Failed(e.to_string())
            }
        }
    }
}
