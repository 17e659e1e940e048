//! Chat session against an OpenAI-compatible endpoint.

use arena_application::{GatewayError, LlmReply, LlmSession};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use tracing::{debug, warn};

/// One conversation with a model.
///
/// Every successful `send` appends the user message and the assistant
/// reply, so later sends carry the whole conversation.
pub struct OpenAiSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    messages: Mutex<Vec<Value>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        max_tokens: u32,
        system_prompt: &str,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.trim().is_empty() {
            messages.push(json!({"role": "system", "content": system_prompt}));
        }
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
            max_tokens,
            messages: Mutex::new(messages),
        }
    }

    fn snapshot(&self) -> Vec<Value> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    async fn post(&self, body: &Value) -> Result<Value, GatewayError> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(model = %self.model, status = status.as_u16(), "Chat completion failed");
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                GatewayError::ModelNotAvailable(format!("{}: {}", self.model, text))
            } else {
                GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), text))
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Response is not JSON: {}", e)))
    }
}

fn request_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

/// Pull `choices[0].message.content` and token usage out of a response body
pub(crate) fn parse_reply(body: &Value) -> Result<LlmReply, GatewayError> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            GatewayError::InvalidResponse("Response missing choices[0].message.content".to_string())
        })?;

    let usage = |field: &str| {
        body.pointer(&format!("/usage/{}", field))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };

    Ok(LlmReply {
        content: content.to_string(),
        input_tokens: usage("prompt_tokens"),
        output_tokens: usage("completion_tokens"),
    })
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<LlmReply, GatewayError> {
        let user_message = json!({"role": "user", "content": content});
        let mut messages = self.snapshot();
        messages.push(user_message.clone());

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        });

        debug!(model = %self.model, bytes = content.len(), "Sending chat completion");
        let reply = parse_reply(&self.post(&body).await?)?;
        debug!(
            model = %self.model,
            input_tokens = reply.input_tokens,
            output_tokens = reply.output_tokens,
            "Received chat completion"
        );

        if let Ok(mut stored) = self.messages.lock() {
            stored.push(user_message);
            stored.push(json!({"role": "assistant", "content": reply.content}));
        }
        Ok(reply)
    }

    fn transcript(&self) -> Value {
        Value::Array(self.snapshot())
    }
}
