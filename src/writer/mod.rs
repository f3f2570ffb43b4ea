//! Paragraph writing orchestration.
//!
//! The writer drives three modes over one project:
//! - draft: compose a new paragraph from paragraph memory
//! - revise: rework the Current Paragraph using revision feedback and/or
//!   inline `{comment}` annotations
//! - apply: rework the latest draft against the newest professor to-do list
//!
//! Every mode builds a sectioned prompt, logs it, calls the provider once,
//! and writes the result to the history, output, and memory files.

pub mod history;
pub mod latex;

use crate::comments::{extract_inline_comments, format_inline_feedback};
use crate::config::GenerationLimits;
use crate::error::{QuillError, Result};
use crate::memory::{sections, MemoryDocument, MemoryStore};
use crate::project::ProjectPaths;
use crate::prompt::PromptBuilder;
use crate::provider::{GenerationRequest, Provider};

const DRAFT_MODE: &str = "NewParagraph";
const REVISE_MODE: &str = "ReviseParagraph";
const APPLY_MODE: &str = "ApplyTodo";

/// Outcome of one writer run.
#[derive(Debug, Clone)]
pub struct DraftResult {
    pub text: String,
    pub latex: String,
    pub version: u32,
}

/// Orchestrates drafting and revision for one project.
pub struct Writer<'a> {
    paths: ProjectPaths,
    provider: &'a dyn Provider,
    limits: GenerationLimits,
}

impl<'a> Writer<'a> {
    pub fn new(paths: ProjectPaths, provider: &'a dyn Provider, limits: GenerationLimits) -> Self {
        Self {
            paths,
            provider,
            limits,
        }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Write a new paragraph from paragraph memory.
    pub fn draft(&self) -> Result<DraftResult> {
        let temp = MemoryStore::load_paragraph(&self.paths.temp_memory)?;
        let project = MemoryStore::load_project(&self.paths.project_memory)?;

        let prompt = build_draft_prompt(&temp, &project, &self.limits, &self.paths)?;
        history::log_prompt(&self.paths.prompt_log, DRAFT_MODE, &prompt)?;

        let text = self.provider.generate(&GenerationRequest::new(prompt))?;
        self.finish(DRAFT_MODE, &text)
    }

    /// Revise the Current Paragraph using feedback and inline comments.
    pub fn revise(&self) -> Result<DraftResult> {
        let temp = MemoryStore::load_paragraph(&self.paths.temp_memory)?;
        let project = MemoryStore::load_project(&self.paths.project_memory)?;

        let prompt = build_revision_prompt(&temp, &project, &self.limits, &self.paths)?;
        history::log_prompt(&self.paths.prompt_log, REVISE_MODE, &prompt)?;

        let text = self.provider.generate(&GenerationRequest::new(prompt))?;
        self.finish(REVISE_MODE, &text)
    }

    /// Revise the latest draft against the newest to-do list.
    pub fn apply_todo(&self) -> Result<DraftResult> {
        let todo_content = read_nonempty(&self.paths.todo_history)?;
        let todo_list = history::latest_todo(&todo_content)
            .ok_or_else(|| QuillError::Other("no to-do list found; run 'quill review' first".into()))?;

        let history_content = read_nonempty(&self.paths.writing_history)?;
        let latest = history::latest_entry(&history_content)
            .ok_or_else(|| QuillError::Other("no writing found; run 'quill write' first".into()))?;

        let project = MemoryStore::load_project(&self.paths.project_memory)?;
        let prompt = build_apply_prompt(&latest, &todo_list, &project, &self.limits);
        history::log_prompt(&self.paths.prompt_log, APPLY_MODE, &prompt)?;

        let text = self.provider.generate(&GenerationRequest::new(prompt))?;
        self.finish(APPLY_MODE, &text)
    }

    /// Common tail of every mode: strip stray inline comments, render
    /// LaTeX, record history, and refresh output files and memory.
    fn finish(&self, mode: &str, text: &str) -> Result<DraftResult> {
        let (text, _) = extract_inline_comments(text);
        let latex = latex::render_latex(self.provider, &text);

        let version = history::append_entry(&self.paths.writing_history, &text, mode)?;

        write_with_parents(&self.paths.output_plaintext, &text)?;
        write_with_parents(&self.paths.output_latex, &format!("{latex}\n"))?;

        let mut temp = MemoryStore::load_paragraph(&self.paths.temp_memory)?;
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        temp.set(sections::OUTPUT, lines);
        temp.save(&self.paths.temp_memory)?;

        Ok(DraftResult {
            text,
            latex,
            version,
        })
    }
}

/// Assemble the draft-mode prompt. Requires a Topic Sentence or Bullet
/// Points in paragraph memory.
pub fn build_draft_prompt(
    temp: &MemoryDocument,
    project: &MemoryDocument,
    limits: &GenerationLimits,
    paths: &ProjectPaths,
) -> Result<String> {
    let topic_sentence = temp.first_entry(sections::TOPIC_SENTENCE);
    let bullet_points = temp.entries(sections::BULLET_POINTS);

    if topic_sentence.is_none() && bullet_points.is_empty() {
        return Err(QuillError::MissingSection {
            section: sections::TOPIC_SENTENCE.to_string(),
            file: paths.temp_memory.clone(),
        });
    }

    let key_ideas = cap(project.entries(sections::KEY_IDEAS), limits.key_idea_limit);
    let recent = cap(
        project.entries(sections::PREVIOUS_CONTENT),
        limits.recent_content_limit,
    );
    let template = temp.joined(sections::TEMPLATE_FLOW);

    let mut requirements = vec![
        "Write a new standalone paragraph (ignore any previously drafted text).".to_string(),
    ];
    if topic_sentence.is_some() {
        requirements.push(
            "Incorporate the provided topic sentence (or a refined variant) near the beginning."
                .to_string(),
        );
    }
    if !bullet_points.is_empty() {
        requirements.push("Cover every bullet point with specific evidence or reasoning.".to_string());
    }
    if template.is_some() {
        requirements.push("Follow the template flow order when developing the paragraph.".to_string());
    }
    requirements.push("Maintain scholarly tone, smooth transitions, and precise language.".to_string());
    requirements.push("Return only the finalized paragraph (no explanations or lists).".to_string());

    Ok(PromptBuilder::new(
        "You are an expert research writer. Produce exactly one cohesive academic paragraph \
         using only the information below.",
    )
    .section(
        sections::WRITING_CONTEXT,
        temp.joined(sections::WRITING_CONTEXT).as_deref(),
    )
    .bullet_section("Project Key Ideas", key_ideas)
    .section(sections::TOPIC_SENTENCE, topic_sentence)
    .bullet_section(sections::BULLET_POINTS, bullet_points)
    .section(sections::TEMPLATE_FLOW, template.as_deref())
    .bullet_section("Recent Project Content", recent)
    .requirements(&requirements)
    .build())
}

/// Assemble the revise-mode prompt. Requires a Current Paragraph and some
/// form of feedback (section entries or inline comments).
pub fn build_revision_prompt(
    temp: &MemoryDocument,
    project: &MemoryDocument,
    limits: &GenerationLimits,
    paths: &ProjectPaths,
) -> Result<String> {
    let raw_paragraph = temp.joined(sections::CURRENT_PARAGRAPH).ok_or_else(|| {
        QuillError::MissingSection {
            section: sections::CURRENT_PARAGRAPH.to_string(),
            file: paths.temp_memory.clone(),
        }
    })?;

    let (current_paragraph, inline_comments) = extract_inline_comments(&raw_paragraph);
    if current_paragraph.trim().is_empty() {
        return Err(QuillError::MissingSection {
            section: sections::CURRENT_PARAGRAPH.to_string(),
            file: paths.temp_memory.clone(),
        });
    }

    let inline_feedback = format_inline_feedback(&inline_comments);
    let mut revision_feedback = temp.joined(sections::REVISION_FEEDBACK);
    if revision_feedback.as_deref().map(str::trim).unwrap_or("").is_empty() {
        if inline_feedback.is_empty() {
            return Err(QuillError::MissingSection {
                section: sections::REVISION_FEEDBACK.to_string(),
                file: paths.temp_memory.clone(),
            });
        }
        revision_feedback = Some("Address every inline comment listed below.".to_string());
    }

    let topic_sentence = temp.first_entry(sections::TOPIC_SENTENCE);
    let bullet_points = temp.entries(sections::BULLET_POINTS);
    let template = temp.joined(sections::TEMPLATE_FLOW);
    let key_ideas = cap(project.entries(sections::KEY_IDEAS), limits.key_idea_limit);
    let recent = cap(
        project.entries(sections::PREVIOUS_CONTENT),
        limits.recent_content_limit,
    );

    let mut requirements = vec![
        "Resolve every item in the revision feedback before returning the paragraph.".to_string(),
    ];
    if !inline_feedback.is_empty() {
        requirements
            .push("Ensure each inline comment's sentence reflects the requested change.".to_string());
    }
    if topic_sentence.is_some() {
        requirements
            .push("Keep the topic sentence consistent with the provided guidance.".to_string());
    }
    if !bullet_points.is_empty() {
        requirements.push("Address every bullet point with concrete detail or logic.".to_string());
    }
    if template.is_some() {
        requirements.push("Honor the template flow order when restructuring content.".to_string());
    }
    requirements.push(
        "Preserve the original meaning and claims while improving clarity and flow.".to_string(),
    );
    requirements.push("Return only the revised paragraph text (no explanations).".to_string());

    Ok(PromptBuilder::new(
        "You are revising the following academic paragraph. Apply the feedback carefully and \
         return one improved paragraph.",
    )
    .section(
        sections::WRITING_CONTEXT,
        temp.joined(sections::WRITING_CONTEXT).as_deref(),
    )
    .section(sections::CURRENT_PARAGRAPH, Some(&current_paragraph))
    .section(sections::REVISION_FEEDBACK, revision_feedback.as_deref())
    .line_section("Inline Comments (sentence-specific)", &inline_feedback)
    .bullet_section("Project Key Ideas", key_ideas)
    .section(sections::TOPIC_SENTENCE, topic_sentence)
    .bullet_section(sections::BULLET_POINTS, bullet_points)
    .section(sections::TEMPLATE_FLOW, template.as_deref())
    .bullet_section("Recent Project Content", recent)
    .requirements(&requirements)
    .build())
}

/// Assemble the apply-mode prompt from the latest draft and to-do list.
pub fn build_apply_prompt(
    latest_writing: &str,
    todo_list: &str,
    project: &MemoryDocument,
    limits: &GenerationLimits,
) -> String {
    let writing = tail_chars(latest_writing, limits.history_context_chars);
    let key_ideas = cap(project.entries(sections::KEY_IDEAS), limits.key_idea_limit);

    PromptBuilder::new(
        "You are revising an academic paragraph to resolve reviewer to-do items. Apply every \
         item and return one improved paragraph.",
    )
    .section("Current Writing", Some(writing))
    .section("Todo List", Some(todo_list))
    .bullet_section("Project Key Ideas", key_ideas)
    .requirements(&[
        "Address every item in the to-do list.".to_string(),
        "Preserve the original meaning and claims.".to_string(),
        "Return only the revised paragraph text (no explanations).".to_string(),
    ])
    .build()
}

fn cap(entries: &[String], limit: usize) -> &[String] {
    &entries[..entries.len().min(limit)]
}

/// Last `n` characters of `s`, on a char boundary.
fn tail_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    let (idx, _) = s.char_indices().nth(count - n).expect("index in range");
    &s[idx..]
}

fn read_nonempty(path: &std::path::Path) -> Result<String> {
    if !path.exists() {
        return Err(QuillError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(QuillError::EmptyFile(path.to_path_buf()));
    }
    Ok(content)
}

fn write_with_parents(path: &std::path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
