//! AI provider adapters.
//!
//! The core treats text generation as an opaque blocking call behind the
//! [`Provider`] trait. Two implementations exist, Gemini and OpenAI, both
//! speaking JSON over a shared blocking HTTP agent. Credential checks
//! happen at construction time so a missing key surfaces as a
//! configuration error before any network traffic.

pub mod gemini;
pub mod openai;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::error::{QuillError, Result};

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Which backing model API to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    fn other(&self) -> ProviderKind {
        match self {
            ProviderKind::Gemini => ProviderKind::OpenAi,
            ProviderKind::OpenAi => ProviderKind::Gemini,
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(format!("unknown provider: {s} (expected gemini or openai)")),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user prompt.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A blocking text-generation backend.
pub trait Provider {
    /// Short provider name for logs and messages.
    fn name(&self) -> &'static str;

    /// Generate text for a request. Blocking; no retry semantics.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Build the requested provider, falling back to the other one when the
/// requested credential is missing. Fails with [`QuillError::NoProviderAvailable`]
/// when neither is configured.
pub fn select_provider(kind: ProviderKind, config: &Config) -> Result<Box<dyn Provider>> {
    match build(kind, config) {
        Ok(provider) => Ok(provider),
        Err(QuillError::MissingApiKey(_)) => match build(kind.other(), config) {
            Ok(provider) => {
                warn!(
                    requested = kind.as_str(),
                    using = kind.other().as_str(),
                    "requested provider has no API key; falling back"
                );
                Ok(provider)
            }
            Err(QuillError::MissingApiKey(_)) => Err(QuillError::NoProviderAvailable),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}

fn build(kind: ProviderKind, config: &Config) -> Result<Box<dyn Provider>> {
    Ok(match kind {
        ProviderKind::Gemini => Box::new(GeminiProvider::from_config(&config.gemini)?),
        ProviderKind::OpenAi => Box::new(OpenAiProvider::from_config(&config.openai)?),
    })
}

/// Resolve an API key: explicit config value first, then the environment.
pub(crate) fn resolve_key(explicit: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = explicit {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(QuillError::MissingApiKey(env_var.to_string())),
    }
}

/// Shared blocking HTTP agent with connect and overall timeouts.
pub(crate) fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("OPENAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("claude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), "\"openai\"");
        let parsed: ProviderKind = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(parsed, ProviderKind::Gemini);
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let key = resolve_key(Some("abc123"), "QUILL_TEST_UNSET_VAR").unwrap();
        assert_eq!(key, "abc123");
    }

    #[test]
    fn blank_key_and_env_is_a_config_error() {
        let err = resolve_key(Some("  "), "QUILL_TEST_UNSET_VAR").unwrap_err();
        assert!(matches!(err, QuillError::MissingApiKey(_)));
    }

    #[test]
    fn request_carries_system_instruction() {
        let req = GenerationRequest::new("prompt").with_system("system");
        assert_eq!(req.system.as_deref(), Some("system"));
    }
}
