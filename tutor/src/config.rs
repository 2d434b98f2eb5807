//! Tutor config: LLM provider, vision OCR, logging, learner defaults. Loaded from env.

use anyhow::{bail, Result};
use llm_client::EnvLlmConfig;
use ocr_client::DEFAULT_ENDPOINT;
use std::env;
use tutor_core::LearnerProfile;

#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// LLM_PROVIDER and the provider's key, URL, model
    pub llm: EnvLlmConfig,
    /// CLOUD_VISION_API_KEY
    pub vision_api_key: String,
    /// CLOUD_VISION_URL
    pub vision_endpoint: String,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// GRADE_RANGE
    pub grade_range: String,
}

impl TutorConfig {
    /// Load from environment variables.
    pub fn load() -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let vision_api_key = env::var("CLOUD_VISION_API_KEY")
            .unwrap_or_default()
            .trim()
            .to_string();
        let vision_endpoint =
            env::var("CLOUD_VISION_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let grade_range = env::var("GRADE_RANGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| LearnerProfile::default().grade_range);
        Ok(Self {
            llm,
            vision_api_key,
            vision_endpoint,
            log_file,
            grade_range,
        })
    }

    /// Checks the LLM key and that both endpoints are valid URLs.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        if reqwest::Url::parse(&self.llm.llm_base_url).is_err() {
            bail!("LLM base URL is not a valid URL: {}", self.llm.llm_base_url);
        }
        if reqwest::Url::parse(&self.vision_endpoint).is_err() {
            bail!("CLOUD_VISION_URL is not a valid URL: {}", self.vision_endpoint);
        }
        Ok(())
    }

    /// OCR needs its own key; chat-only use does not.
    pub fn validate_vision(&self) -> Result<()> {
        if self.vision_api_key.is_empty() {
            bail!("CLOUD_VISION_API_KEY is not set");
        }
        Ok(())
    }

    pub fn learner_profile(&self) -> LearnerProfile {
        LearnerProfile {
            grade_range: self.grade_range.clone(),
        }
    }
}
