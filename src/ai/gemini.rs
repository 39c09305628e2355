use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::AiError;

use super::provider::{truncate, ChatModel};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiModel {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        GeminiModel { client, api_key, model }
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);

        let payload = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "temperature": 0.0,
                "maxOutputTokens": 512
            }
        });

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Status(status, truncate(&body, 200)));
        }

        let data: Value = resp.json().await?;
        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(text)
    }
}
