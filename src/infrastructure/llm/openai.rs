use crate::domain::error::DomainError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";

/// Thin chat-completions client. Each agent owns its own instance carrying
/// its own system instructions.
pub struct OpenAiChat {
    client: Client,
    api_key: String,
    model: String,
    instructions: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiChat {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("TokenIntel/0.1")
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|err| {
                    warn!(error = %err, "Failed to build HTTP client, using defaults");
                    Client::new()
                }),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            instructions: None,
        }
    }

    /// System instructions sent ahead of every user prompt.
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = Some(instructions.to_string());
        self
    }

    fn build_messages(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::new();
        if let Some(instructions) = &self.instructions {
            messages.push(ChatMessage {
                role: "system".into(),
                content: instructions.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".into(),
            content: prompt.to_string(),
        });
        messages
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let resp = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: self.build_messages(prompt),
            })
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Provider(format!("OpenAI API {status}: {body}")));
        }

        let result: ChatResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("OpenAI response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::Provider("OpenAI returned no choices".into()))
    }
}
