//! Distill staged output into project memory.
//!
//! `Output/StagedOutput.txt` collects draft material the user wants the
//! project to remember. Distillation asks the model for the most important,
//! maximally diverse sentences and replaces the Previous Content section of
//! project memory with them.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QuillError, Result};
use crate::memory::{sections, MemoryStore};
use crate::project::ProjectPaths;
use crate::provider::{GenerationRequest, Provider};

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

static DASH_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s*").unwrap());

/// Lines that are model preamble rather than extracted sentences.
static INSTRUCTION_LINES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^here are \d+",
        r"^here are the \d+",
        r"^the following are",
        r"^these are \d+",
        r"^below are \d+",
        r"^the \d+ (most important|diverse|sentences)",
        r"^these (sentences|are)",
        r"^following are",
        r"^extracted (sentences|from)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Minimum length for a line to count as a real sentence.
const MIN_SENTENCE_LEN: usize = 20;

/// Summarize staged-output text into at most `max_sentences` sentences.
pub fn summarize_staged(
    provider: &dyn Provider,
    content: &str,
    max_sentences: usize,
) -> Result<Vec<String>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let prompt = format!(
        "You are analyzing a research paper draft. Extract exactly {max_sentences} sentences \
         that are the most important and diverse.\n\
         \n\
         The sentences should:\n\
         1. Capture the most critical ideas and contributions\n\
         2. Be as diverse as possible - covering different topics, concepts, and aspects\n\
         3. Represent distinct ideas rather than repeating similar points\n\
         4. Be complete, meaningful sentences from the draft\n\
         \n\
         IMPORTANT: Output ONLY the sentences themselves. Do NOT include any introductory \
         text, instructions, or explanations like \"Here are {max_sentences} sentences:\". \
         Just list the sentences directly.\n\
         \n\
         Here is the draft content:\n\
         \n\
         {content}\n\
         \n\
         Output exactly {max_sentences} sentences, one per line, as a numbered list \
         (1. sentence, 2. sentence, etc.). Do not include any preface or instruction text."
    );

    let response = provider.generate(&GenerationRequest::new(prompt))?;
    let mut sentences = parse_summary_lines(&response);
    sentences.truncate(max_sentences);
    Ok(sentences)
}

/// Clean model output into bare sentences: numbering stripped, short lines
/// and instruction preambles dropped.
pub fn parse_summary_lines(raw: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line = NUMBER_PREFIX.replace(line, "");
        let line = DASH_PREFIX.replace(&line, "");
        let line = line.trim();

        if line.chars().count() < MIN_SENTENCE_LEN {
            continue;
        }

        let lower = line.to_lowercase();
        if INSTRUCTION_LINES.iter().any(|re| re.is_match(&lower)) {
            continue;
        }

        sentences.push(line.to_string());
    }

    sentences
}

/// Distill a project's staged output and replace the Previous Content
/// section of its project memory. Returns the stored sentences.
pub fn update_previous_content(
    provider: &dyn Provider,
    paths: &ProjectPaths,
    max_sentences: usize,
) -> Result<Vec<String>> {
    if !paths.staged_output.exists() {
        return Err(QuillError::FileNotFound(paths.staged_output.clone()));
    }
    let content = std::fs::read_to_string(&paths.staged_output)?;

    let sentences = summarize_staged(provider, &content, max_sentences)?;
    if sentences.is_empty() {
        return Ok(sentences);
    }

    let mut project = MemoryStore::load_project(&paths.project_memory)?;
    project.set(sections::PREVIOUS_CONTENT, sentences.clone());
    project.save(&paths.project_memory)?;

    Ok(sentences)
}
