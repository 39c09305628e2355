use async_trait::async_trait;

use crate::errors::AiError;

use super::provider::{openai_chat_completion, ChatModel};

const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub struct GroqModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqModel {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        GroqModel { client, api_key, model }
    }
}

#[async_trait]
impl ChatModel for GroqModel {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        openai_chat_completion(&self.client, GROQ_URL, &self.api_key, &self.model, prompt).await
    }
}
