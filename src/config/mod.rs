//! Project configuration loading and defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Main quill configuration, stored as `.quill.config.json` in the
/// working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Default AI provider
    #[serde(default)]
    pub provider: ProviderKind,

    /// Directory holding writing projects
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// Path to the global memory file (writing heuristics)
    #[serde(default = "default_global_memory")]
    pub global_memory: PathBuf,

    /// Gemini provider settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// OpenAI provider settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Prompt assembly limits
    #[serde(default)]
    pub generation: GenerationLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            provider: ProviderKind::default(),
            projects_dir: default_projects_dir(),
            global_memory: default_global_memory(),
            gemini: GeminiConfig::default(),
            openai: OpenAiConfig::default(),
            generation: GenerationLimits::default(),
        }
    }
}

impl Config {
    /// Load config from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location or fall back to defaults.
    pub fn load_or_default() -> Self {
        Self::load(".quill.config.json").unwrap_or_default()
    }
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_global_memory() -> PathBuf {
    PathBuf::from("global_memory.txt")
}

/// Gemini provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Explicit API key (takes precedence over the environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable consulted when no explicit key is set
    #[serde(default = "default_gemini_key_env")]
    pub api_key_env: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: None,
            api_key_env: default_gemini_key_env(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

/// OpenAI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model identifier
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Explicit API key (takes precedence over the environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable consulted when no explicit key is set
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_key: None,
            api_key_env: default_openai_key_env(),
            temperature: default_temperature(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

/// Caps applied when assembling prompts from memory files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationLimits {
    /// Maximum project key ideas included in a prompt
    #[serde(default = "default_key_idea_limit")]
    pub key_idea_limit: usize,

    /// Maximum recent-content entries included in a prompt
    #[serde(default = "default_recent_content_limit")]
    pub recent_content_limit: usize,

    /// Trailing characters of writing history used as revision context
    #[serde(default = "default_history_context_chars")]
    pub history_context_chars: usize,

    /// Sentences kept when distilling staged output into project memory
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            key_idea_limit: default_key_idea_limit(),
            recent_content_limit: default_recent_content_limit(),
            history_context_chars: default_history_context_chars(),
            summary_sentences: default_summary_sentences(),
        }
    }
}

fn default_key_idea_limit() -> usize {
    5
}

fn default_recent_content_limit() -> usize {
    3
}

fn default_history_context_chars() -> usize {
    2000
}

fn default_summary_sentences() -> usize {
    10
}
