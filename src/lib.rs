#![forbid(unsafe_code)]

//! # quill - memory-driven academic writing assistant
//!
//! Drafts and revises research-paper paragraphs from a tiered memory store
//! of flat text files, using Gemini or OpenAI as the text generator.
//!
//! ## Memory tiers
//!
//! - **Global**: writing heuristics shared by every project
//!   (`global_memory.txt`)
//! - **Project**: key ideas and distilled prior content
//!   (`Memory/ProjectMemory.txt`)
//! - **Paragraph**: the working set for one paragraph
//!   (`Memory/TempMemory.txt`)
//!
//! All tiers share one flat-file format: `===== Section =====` headers over
//! `•` bullets. Revision feedback can also be embedded inline in paragraph
//! text as `{comment}` annotations.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quill::{Config, ProjectPaths, Writer};
//! use quill::provider::{select_provider, ProviderKind};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default();
//!     let paths = ProjectPaths::require(&config.projects_dir, "my-paper")?;
//!     let provider = select_provider(ProviderKind::Gemini, &config)?;
//!
//!     let writer = Writer::new(paths, provider.as_ref(), config.generation.clone());
//!     let result = writer.draft()?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```

pub mod comments;
pub mod commands;
pub mod config;
pub mod distill;
pub mod error;
pub mod extract;
pub mod memory;
pub mod professor;
pub mod project;
pub mod prompt;
pub mod provider;
pub mod template;
pub mod writer;

// Re-exports
pub use comments::{extract_inline_comments, format_inline_feedback, InlineComment};
pub use config::Config;
pub use error::{QuillError, Result};
pub use memory::{MemoryDocument, MemorySection, MemoryStore};
pub use project::{create_project, scan_projects, ProjectPaths};
pub use prompt::PromptBuilder;
pub use provider::{select_provider, GenerationRequest, Provider, ProviderKind};
pub use writer::{DraftResult, Writer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
