//! OpenAI API provider.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::error::{QuillError, Result};

use super::{GenerationRequest, Provider};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Blocking client for the OpenAI chat completions endpoint.
pub struct OpenAiProvider {
    agent: ureq::Agent,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, temperature: f32) -> Self {
        Self {
            agent: super::http_agent(),
            api_key,
            model,
            temperature,
        }
    }

    /// Build from config, resolving the API key. Fails with a
    /// missing-credential error before any network call.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        let api_key = super::resolve_key(config.api_key.as_deref(), &config.api_key_env)?;
        Ok(Self::new(api_key, config.model.clone(), config.temperature))
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        let body = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.temperature),
        };

        debug!(model = %self.model, "openai chat completion");

        let response = match self
            .agent
            .post(API_URL)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                let message = serde_json::from_str::<OpenAiErrorBody>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(QuillError::Api {
                    provider: "openai",
                    status,
                    message,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(QuillError::Network(transport.to_string()));
            }
        };

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| QuillError::Network(format!("failed to parse response: {e}")))?;

        let text = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(QuillError::EmptyResponse("openai"));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}
