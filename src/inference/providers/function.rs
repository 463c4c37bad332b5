//! Chat function provider.
//!
//! Talks to a hosted function that wraps the model on the server side:
//! one JSON POST with the message, one JSON body back with the reply. No
//! auth header, no history, no retry. Timeouts are whatever the HTTP
//! client defaults to.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::inference::provider::non_empty_reply;
use crate::inference::types::{ChatFunctionError, ChatFunctionRequest, ChatFunctionResponse};
use crate::inference::{ChatProvider, ChatRequest, ProviderError};

pub struct FunctionProvider {
    endpoint: String,
    client: reqwest::Client,
}

impl FunctionProvider {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pulls the `error` field out of an error body, falling back to the raw text.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ChatFunctionError>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    }
}

#[async_trait]
impl ChatProvider for FunctionProvider {
    fn name(&self) -> &str {
        "function"
    }

    async fn reply(&self, request: ChatRequest<'_>) -> Result<String, ProviderError> {
        info!(
            "Chat function request: endpoint={}, message_len={}",
            self.endpoint,
            request.message.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatFunctionRequest {
                message: request.message,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Chat function response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat function error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: error_message(err_body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let parsed: ChatFunctionResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let reply = non_empty_reply(parsed.reply)?;
        info!("Chat function reply: {} bytes", reply.len());
        Ok(reply)
    }
}
