use crate::client::describe_error;
use crate::config::Config;
use crate::models::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use anyhow::{Context, Result};
use std::sync::OnceLock;
use ureq::{Agent, AgentBuilder};

/// Text generation capability used for roasts and playlist synthesis
#[cfg_attr(test, mockall::automock)]
pub trait LanguageModel {
    /// Single-shot, non-streaming completion of `prompt`
    fn generate(&self, model_id: &str, prompt: &str) -> Result<String>;
}

/// A blocking client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

static SHARED: OnceLock<GeminiClient> = OnceLock::new();

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .context("GEMINI_API_KEY is not set")?;
        let agent = AgentBuilder::new().timeout(config.request_timeout).build();

        Ok(GeminiClient {
            agent,
            base_url: config.gemini_api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Process-wide client, built from the first config it is asked with
    pub fn shared(config: &Config) -> Result<&'static GeminiClient> {
        if let Some(client) = SHARED.get() {
            return Ok(client);
        }
        let client = GeminiClient::new(config)?;
        Ok(SHARED.get_or_init(|| client))
    }

    fn endpoint(&self, model_id: &str) -> String {
        // Accept both "gemini-2.5-flash" and "models/gemini-2.5-flash"
        let model = model_id.trim_start_matches("models/");
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl LanguageModel for GeminiClient {
    fn generate(&self, model_id: &str, prompt: &str) -> Result<String> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        log::debug!("Sending {} character prompt to {model_id}", prompt.len());
        let response = self
            .agent
            .post(&self.endpoint(model_id))
            .set("x-goog-api-key", &self.api_key)
            .send_json(&request_body)
            .map_err(describe_error)
            .context("Language model request failed")?;

        let parsed: GenerateContentResponse = response
            .into_json()
            .context("Failed to parse language model response")?;

        parsed
            .text()
            .ok_or_else(|| anyhow::anyhow!("Language model returned no text"))
    }
}
