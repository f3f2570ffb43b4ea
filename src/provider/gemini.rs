//! Gemini API provider.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeminiConfig;
use crate::error::{QuillError, Result};

use super::{GenerationRequest, Provider};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            agent: super::http_agent(),
            api_key,
            model,
        }
    }

    /// Build from config, resolving the API key. Fails with a
    /// missing-credential error before any network call.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let api_key = super::resolve_key(config.api_key.as_deref(), &config.api_key_env)?;
        Ok(Self::new(api_key, config.model.clone()))
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system.as_ref().map(|system| Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: system.clone(),
                }],
            }),
        };

        debug!(model = %self.model, "gemini generate_content");

        let response = match self.agent.post(&url).send_json(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                let message = serde_json::from_str::<GeminiErrorBody>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(QuillError::Api {
                    provider: "gemini",
                    status,
                    message,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(QuillError::Network(transport.to_string()));
            }
        };

        let parsed: GenerateContentResponse = response
            .into_json()
            .map_err(|e| QuillError::Network(format!("failed to parse response: {e}")))?;

        let text = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(QuillError::EmptyResponse("gemini"));
        }
        Ok(text)
    }
}

/// Content in a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

/// A text content part. Only text parts are used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "be brief".to_string(),
                }],
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn response_parses_candidate_text() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "generated"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "generated");
    }

    #[test]
    fn error_body_parses_message() {
        let json = r#"{"error": {"code": 400, "message": "bad key", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "bad key");
    }
}
