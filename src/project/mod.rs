//! Project directory layout and scaffolding.
//!
//! ```text
//! projects/
//! └── <name>/
//!     ├── Memory/
//!     │   ├── ProjectMemory.txt
//!     │   └── TempMemory.txt
//!     ├── Intermediate/
//!     │   ├── WritingHistory.txt
//!     │   ├── TodoHistory.txt
//!     │   └── prompt.txt
//!     └── Output/
//!         ├── Plaintext.txt
//!         ├── Latex.txt
//!         └── StagedOutput.txt
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{QuillError, Result};
use crate::memory::{sections, MemoryDocument};

/// Resolved file locations for one project. Resolution never touches the
/// filesystem.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub name: String,
    pub root: PathBuf,
    pub project_memory: PathBuf,
    pub temp_memory: PathBuf,
    pub writing_history: PathBuf,
    pub todo_history: PathBuf,
    pub prompt_log: PathBuf,
    pub output_plaintext: PathBuf,
    pub output_latex: PathBuf,
    pub staged_output: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(projects_dir: &Path, name: &str) -> Self {
        let root = projects_dir.join(name);
        Self {
            name: name.to_string(),
            project_memory: root.join("Memory").join("ProjectMemory.txt"),
            temp_memory: root.join("Memory").join("TempMemory.txt"),
            writing_history: root.join("Intermediate").join("WritingHistory.txt"),
            todo_history: root.join("Intermediate").join("TodoHistory.txt"),
            prompt_log: root.join("Intermediate").join("prompt.txt"),
            output_plaintext: root.join("Output").join("Plaintext.txt"),
            output_latex: root.join("Output").join("Latex.txt"),
            staged_output: root.join("Output").join("StagedOutput.txt"),
            root,
        }
    }

    /// Resolve and verify the project directory exists.
    pub fn require(projects_dir: &Path, name: &str) -> Result<Self> {
        let paths = Self::resolve(projects_dir, name);
        if !paths.root.is_dir() {
            return Err(QuillError::ProjectNotFound(paths.root));
        }
        Ok(paths)
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }
}

/// Scaffold a project: create directories and seed memory files. Existing
/// files are left alone, so re-running only fills gaps.
pub fn create_project(projects_dir: &Path, name: &str) -> Result<ProjectPaths> {
    let paths = ProjectPaths::resolve(projects_dir, name);

    for dir in [
        paths.root.clone(),
        paths.root.join("Memory"),
        paths.root.join("Intermediate"),
        paths.root.join("Output"),
    ] {
        std::fs::create_dir_all(dir)?;
    }

    if !paths.project_memory.exists() {
        let mut doc = MemoryDocument::new();
        doc.ensure_section(sections::KEY_IDEAS);
        doc.ensure_section(sections::PREVIOUS_CONTENT);
        doc.ensure_section(sections::OUTLINES);
        doc.save(&paths.project_memory)?;
    }

    if !paths.temp_memory.exists() {
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
        doc.save(&paths.temp_memory)?;
    }

    for file in [
        &paths.writing_history,
        &paths.todo_history,
        &paths.output_plaintext,
        &paths.output_latex,
        &paths.staged_output,
    ] {
        if !file.exists() {
            std::fs::write(file, "")?;
        }
    }

    Ok(paths)
}

/// Names of projects under `projects_dir` (directories with a `Memory/`
/// subdirectory).
pub fn scan_projects(projects_dir: &Path) -> Vec<String> {
    if !projects_dir.is_dir() {
        return Vec::new();
    }

    let mut names: Vec<String> = WalkDir::new(projects_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.path().join("Memory").is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    names
}
