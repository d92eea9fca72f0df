use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::{LlmConfig, API_KEY_ENV};
use crate::error::TransportError;

/// Instruction sent as the system message of every analysis request.
pub const SYSTEM_PROMPT: &str = "You are a Spring Boot expert. Analyze the controller code and extract: \
1. the request URL 2. the HTTP method 3. the request parameter fields (including the fields inside DTOs) \
4. the response fields. Present them as Markdown tables. \
5. Keep the summary of the endpoint method brief.";

pub const TEMPERATURE: f64 = 0.7;
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of an OpenAI-compatible `chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f64,
}

impl ChatRequest {
    /// The analysis request for an assembled endpoint context.
    pub fn for_context(config: &LlmConfig, context: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(context)],
            stream: false,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Sends a chat request and returns the assistant's reply.
pub trait ChatClient: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> Result<String, TransportError>;
}

/// Blocking HTTP client for an OpenAI-compatible endpoint.
pub struct HttpChatClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpChatClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, TransportError> {
        if !config.has_api_key() {
            return Err(TransportError::MissingApiKey { env: API_KEY_ENV });
        }
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self::with_client(client, &config.api_url, &config.api_key))
    }

    pub fn with_client(client: Client, api_url: &str, api_key: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.trim().to_string(),
        }
    }
}

impl ChatClient for HttpChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, TransportError> {
        tracing::debug!(url = %self.api_url, model = %request.model, "sending chat request");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            let body = if body.trim().is_empty() {
                "Unknown Error".to_string()
            } else {
                body
            };
            return Err(TransportError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TransportError::MalformedResponse("no choices[0].message.content".to_string()))
    }
}
