//! LLM gateway implementation for OpenAI-compatible servers.

use super::session::OpenAiSession;
use arena_application::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for [`OpenAiGateway`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    /// Sent as a bearer token; local servers often need none
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            max_tokens: 4096,
            request_timeout: Duration::from_secs(600),
        }
    }
}

impl OpenAiSettings {
    /// Chat-completions URL, accepting base URLs with or without `/v1`
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

/// Gateway that opens chat sessions against one OpenAI-compatible endpoint.
///
/// The HTTP client is shared by every session it creates.
pub struct OpenAiGateway {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(endpoint = %settings.endpoint(), "OpenAI gateway ready");
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &str,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if model.trim().is_empty() {
            return Err(GatewayError::ModelNotAvailable(
                "model name is empty".to_string(),
            ));
        }
        debug!(model, "Creating chat session");

        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.settings.endpoint(),
            self.settings.api_key.clone(),
            model,
            self.settings.max_tokens,
            system_prompt,
        )))
    }
}
