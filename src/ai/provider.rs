use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AiError;
use crate::settings::AppConfig;

use super::gemini::GeminiModel;
use super::groq::GroqModel;
use super::huggingface::HuggingFaceModel;

/// A hosted chat-completion backend. One prompt in, one text reply out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Ordered fallback chain over the configured providers. The first
/// provider to return a non-empty reply wins; failures are logged and
/// the next provider is tried.
pub struct ModelChain {
    models: Vec<Box<dyn ChatModel>>,
}

impl ModelChain {
    pub fn new(models: Vec<Box<dyn ChatModel>>) -> Self {
        ModelChain { models }
    }

    /// Builds the chain from whichever API keys are configured, in a
    /// fixed order: Gemini, Groq, Hugging Face.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;

        let mut models: Vec<Box<dyn ChatModel>> = Vec::new();

        if let Some(key) = &config.gemini_api_key {
            models.push(Box::new(GeminiModel::new(
                client.clone(),
                key.clone(),
                config.gemini_model.clone(),
            )));
        }
        if let Some(key) = &config.groq_api_key {
            models.push(Box::new(GroqModel::new(
                client.clone(),
                key.clone(),
                config.groq_model.clone(),
            )));
        }
        if let Some(key) = &config.huggingface_api_key {
            models.push(Box::new(HuggingFaceModel::new(
                client,
                key.clone(),
                config.huggingface_model.clone(),
            )));
        }

        Ok(ModelChain::new(models))
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        if self.models.is_empty() {
            return Err(AiError::NoProviderConfigured);
        }

        for model in &self.models {
            match model.complete(prompt).await {
                Ok(text) if !text.trim().is_empty() => return Ok(text),
                Ok(_) => {
                    warn!(provider = model.name(), "Provider returned an empty response");
                }
                Err(e) => {
                    warn!(provider = model.name(), error = %e, "Provider call failed");
                }
            }
        }

        Err(AiError::AllProvidersFailed)
    }
}

/// Shared POST helper for OpenAI-compatible `chat/completions` endpoints.
pub(crate) async fn openai_chat_completion(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, AiError> {
    let payload = json!({
        "model": model,
        "messages": [
            { "role": "user", "content": prompt }
        ],
        "max_tokens": 512,
        "temperature": 0.0
    });

    let resp = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&payload)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AiError::Status(status, truncate(&body, 200)));
    }

    let data: Value = resp.json().await?;
    let content = data["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string();

    if content.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    Ok(content)
}

pub(crate) fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
