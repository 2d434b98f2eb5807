//! LLM configuration: trait and env-based implementation.

use anyhow::{bail, Result};
use std::env;
use std::str::FromStr;

use gemini_client::{DEFAULT_BASE_URL as GEMINI_BASE_URL, DEFAULT_MODEL as GEMINI_MODEL};

use crate::openai_llm::DEFAULT_OPENAI_MODEL;

/// Which provider answers the tutor's requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "gemini" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAI),
            other => bail!("Unknown LLM_PROVIDER: {}", other),
        }
    }
}

/// LLM configuration interface.
pub trait LlmConfig: Send + Sync {
    fn provider(&self) -> LlmProvider;
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn provider(&self) -> LlmProvider {
        self.llm_provider
    }
    fn api_key(&self) -> &str {
        &self.llm_api_key
    }
    fn base_url(&self) -> &str {
        &self.llm_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `LLM_PROVIDER` = `gemini` (default) reads `GEMINI_API_KEY`, `GEMINI_BASE_URL`, `GEMINI_MODEL`;
    /// `openai` reads `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `MODEL`. A missing key is an empty
    /// string here and rejected by [`EnvLlmConfig::validate`].
    pub fn from_env() -> Result<Self> {
        let llm_provider: LlmProvider = env::var("LLM_PROVIDER").unwrap_or_default().parse()?;
        let (key_var, url_var, model_var, default_url, default_model) = match llm_provider {
            LlmProvider::Gemini => (
                "GEMINI_API_KEY",
                "GEMINI_BASE_URL",
                "GEMINI_MODEL",
                GEMINI_BASE_URL,
                GEMINI_MODEL,
            ),
            LlmProvider::OpenAI => (
                "OPENAI_API_KEY",
                "OPENAI_BASE_URL",
                "MODEL",
                "https://api.openai.com/v1",
                DEFAULT_OPENAI_MODEL,
            ),
        };
        let llm_api_key = env::var(key_var).unwrap_or_default().trim().to_string();
        let llm_base_url = env::var(url_var).unwrap_or_else(|_| default_url.to_string());
        let llm_model = env::var(model_var)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_model.to_string());
        Ok(Self {
            llm_provider,
            llm_api_key,
            llm_base_url,
            llm_model,
        })
    }

    /// Fails when the selected provider has no API key.
    pub fn validate(&self) -> Result<()> {
        if self.llm_api_key.is_empty() {
            let var = match self.llm_provider {
                LlmProvider::Gemini => "GEMINI_API_KEY",
                LlmProvider::OpenAI => "OPENAI_API_KEY",
            };
            bail!("{} is not set", var);
        }
        Ok(())
    }
}
