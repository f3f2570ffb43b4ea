//! Tiered memory store.
//!
//! Three tiers feed prompt assembly:
//! - global memory: writing heuristics shared by every project
//! - project memory: key ideas and distilled prior content for one paper
//! - paragraph memory: the working set for a single paragraph draft/revision

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{sections, MemoryDocument};

/// Default heuristics seeded when no global memory file exists anywhere.
const DEFAULT_HEURISTICS: [&str; 5] = [
    "Clarity: Ensure ideas are clearly expressed",
    "Structure: Follow logical flow",
    "Academic Tone: Maintain formal academic style",
    "Evidence: Support claims with evidence",
    "Coherence: Ensure smooth transitions",
];

/// Loads and persists the three memory tiers.
pub struct MemoryStore {
    global_path: PathBuf,
    global: MemoryDocument,
}

impl MemoryStore {
    /// Open the store, loading global memory from `global_path`.
    ///
    /// Lookup order: the given path, then a per-user copy under the OS
    /// config directory, then the built-in defaults.
    pub fn open(global_path: impl Into<PathBuf>) -> Self {
        let global_path: PathBuf = global_path.into();
        let global = if global_path.exists() {
            MemoryDocument::load(&global_path).unwrap_or_else(|_| Self::default_global())
        } else if let Some(user_path) = user_global_path() {
            if user_path.exists() {
                debug!(path = %user_path.display(), "using per-user global memory");
                MemoryDocument::load(&user_path).unwrap_or_else(|_| Self::default_global())
            } else {
                Self::default_global()
            }
        } else {
            Self::default_global()
        };

        Self { global_path, global }
    }

    /// The built-in global memory document.
    pub fn default_global() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.set(sections::WRITING_HEURISTICS, DEFAULT_HEURISTICS);
        doc
    }

    pub fn global(&self) -> &MemoryDocument {
        &self.global
    }

    pub fn global_path(&self) -> &Path {
        &self.global_path
    }

    /// Writing heuristics from the global tier.
    pub fn heuristics(&self) -> &[String] {
        self.global.entries(sections::WRITING_HEURISTICS)
    }

    /// Global memory rendered as flat text, for inclusion in prompts.
    pub fn heuristics_text(&self) -> String {
        self.global.serialize()
    }

    /// Write the global document to its primary path if the file does not
    /// exist yet. Returns whether a file was created.
    pub fn seed_global(&self) -> crate::Result<bool> {
        if self.global_path.exists() {
            return Ok(false);
        }
        self.global.save(&self.global_path)?;
        Ok(true)
    }

    /// Load project memory; a missing file yields the standard empty
    /// sections rather than an error.
    pub fn load_project(path: &Path) -> crate::Result<MemoryDocument> {
        if !path.exists() {
            let mut doc = MemoryDocument::new();
            doc.ensure_section(sections::KEY_IDEAS);
            doc.ensure_section(sections::PREVIOUS_CONTENT);
            doc.ensure_section(sections::OUTLINES);
            return Ok(doc);
        }
        MemoryDocument::load(path)
    }

    /// Load paragraph (temp) memory; a missing file yields the standard
    /// empty sections.
    pub fn load_paragraph(path: &Path) -> crate::Result<MemoryDocument> {
        if !path.exists() {
            let mut doc = MemoryDocument::new();
            for name in [
                sections::WRITING_CONTEXT,
                sections::TOPIC_SENTENCE,
                sections::BULLET_POINTS,
                sections::TEMPLATE_FLOW,
                sections::CURRENT_PARAGRAPH,
                sections::REVISION_FEEDBACK,
            ] {
                doc.ensure_section(name);
            }
            return Ok(doc);
        }
        MemoryDocument::load(path)
    }
}

fn user_global_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quill").join("global_memory.txt"))
}
