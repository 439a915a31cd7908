//! LLM agent module for summarisation.
//!
//! The model sits behind the [`Summarizer`] trait so callers can swap in any
//! text-in/text-out implementation. [`GeminiSummarizer`] is the production one,
//! built on rstructor.

pub use crate::summary::Summary;

use crate::config::Config;
use async_trait::async_trait;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Instruction prepended to every document before it is sent to the model
pub const PROMPT_INSTRUCTION: &str = "Apenas resume isto, sem acrescentar novas informações.\n\n";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("refusing to summarise empty text")]
    EmptyInput,
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// A generative-text capability: prompt in, completion out.
#[async_trait(?Send)]
pub trait Summarizer {
    /// Model identifier reported alongside the summary
    fn model(&self) -> &str;

    /// Send a complete prompt and return the raw response text
    async fn generate(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Build the prompt sent for `text`
pub fn build_prompt(text: &str) -> String {
    format!("{}{}", PROMPT_INSTRUCTION, text)
}

/// Summarise `text` with the given model.
///
/// Empty text never reaches the model.
pub async fn summarize(summarizer: &dyn Summarizer, text: &str) -> Result<Summary, AgentError> {
    if text.is_empty() {
        return Err(AgentError::EmptyInput);
    }

    let prompt = build_prompt(text);
    info!(model = summarizer.model(), chars = text.len(), "requesting summary");

    let response = summarizer.generate(&prompt).await?;
    debug!(chars = response.len(), "received summary");

    Ok(Summary::new(summarizer.model(), response))
}

/// Gemini-backed summariser
pub struct GeminiSummarizer {
    client: GeminiClient,
    model: String,
}

impl GeminiSummarizer {
    pub fn new(api_key: &str, model: &str) -> Result<Self, AgentError> {
        let client = GeminiClient::new(api_key)
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(model));

        Ok(Self {
            client,
            model: model.to_string(),
        })
    }

    /// Build from config. Fails with `MissingApiKey` when the key is unset.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let api_key = config.api_key()?;
        Self::new(api_key, &config.agent.model)
    }
}

#[async_trait(?Send)]
impl Summarizer for GeminiSummarizer {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let result = self
            .client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        Ok(result.text)
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        other => {
            warn!(model = other, "unknown Gemini model, using gemini-2.5-pro");
            GeminiModel::Gemini25Pro
        }
    }
}
