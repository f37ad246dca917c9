//! OpenAI-compatible chat-completions backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use attune_core::{CompletionModel, CompletionRequest, Message};

use crate::LlmError;

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base URL (e.g. `https://api.openai.com/v1`)
    pub endpoint: String,
    /// Default model when the request does not override it
    pub model: String,
    /// Bearer token, if the endpoint requires one
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// OpenAI-compatible backend
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    config: ProviderConfig,
}

impl OpenAiBackend {
    /// Create a new backend
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn execute(&self, request: &ChatCompletionRequest) -> Result<String, LlmError> {
        let response = self
            .authorize(self.client.post(self.api_url("/chat/completions")))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("server error {status}: {body}")));
            }
            return Err(LlmError::Api(format!("{status}: {body}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))
    }
}

#[async_trait]
impl CompletionModel for OpenAiBackend {
    async fn complete(&self, request: CompletionRequest) -> attune_core::Result<String> {
        let model = request
            .params
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let wire = ChatCompletionRequest {
            model,
            messages: request.messages.iter().map(ChatMessage::from).collect(),
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            frequency_penalty: request.params.frequency_penalty,
            presence_penalty: request.params.presence_penalty,
        };

        tracing::debug!(
            model = %wire.model,
            messages = wire.messages.len(),
            "requesting completion"
        );

        let text = self.execute(&wire).await?;
        Ok(text)
    }

    async fn is_available(&self) -> bool {
        self.authorize(self.client.get(self.api_url("/models")))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// OpenAI wire types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
