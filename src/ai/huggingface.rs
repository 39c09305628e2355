use async_trait::async_trait;

use crate::errors::AiError;

use super::provider::{openai_chat_completion, ChatModel};

/// The HF inference router speaks the OpenAI chat-completions dialect.
const HF_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

pub struct HuggingFaceModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl HuggingFaceModel {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        HuggingFaceModel { client, api_key, model }
    }
}

#[async_trait]
impl ChatModel for HuggingFaceModel {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        openai_chat_completion(&self.client, HF_ROUTER_URL, &self.api_key, &self.model, prompt)
            .await
    }
}
