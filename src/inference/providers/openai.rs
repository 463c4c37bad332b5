//! OpenAI provider using the Chat Completions API.
//!
//! Does client-side what the hosted chat function does server-side: wraps
//! the user's message with the chef system prompt and asks for a single,
//! non-streamed completion. Each request still carries only the current
//! message.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::provider::non_empty_reply;
use crate::inference::{ChatProvider, ChatRequest, ProviderError};

// ============================================================================
// Chat Completions API Types
// ============================================================================

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug)]
struct InputMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct CompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<InputMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: OutputMessage,
}

#[derive(Deserialize, Debug)]
struct OutputMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Everything the OpenAI provider needs besides the message itself.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub system_prompt: String,
}

pub struct OpenAiProvider {
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn build_request<'a>(&'a self, message: &'a str) -> CompletionsRequest<'a> {
        CompletionsRequest {
            model: &self.settings.model,
            messages: vec![
                InputMessage {
                    role: Role::System,
                    content: &self.settings.system_prompt,
                },
                InputMessage {
                    role: Role::User,
                    content: message,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ProviderError> {
        if self.settings.api_key.is_empty() {
            return Err(ProviderError::Config("OpenAI API key is empty".to_string()));
        }

        let body = self.build_request(request.message);
        info!(
            "OpenAI request: model={}, message_len={}, max_tokens={}",
            body.model,
            request.message.len(),
            body.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .timeout(self.settings.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("OpenAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let parsed: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        let reply = non_empty_reply(content)?;
        info!("OpenAI reply: {} bytes", reply.len());
        Ok(reply)
    }
}
