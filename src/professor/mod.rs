//! Professor feedback: turn the latest draft into an actionable to-do list.
//!
//! The professor reviews the newest writing-history entry against the
//! global writing heuristics and produces a plain-text numbered list. The
//! model is told to avoid LaTeX/markdown, but responses are normalized
//! anyway before they reach `TodoHistory.txt`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QuillError, Result};
use crate::memory::MemoryStore;
use crate::project::ProjectPaths;
use crate::provider::{GenerationRequest, Provider};
use crate::writer::history;

const SYSTEM_PROMPT: &str = "You are an expert professor providing constructive feedback on \
academic writing. Always generate clear, actionable to-do lists in PLAIN TEXT format only \
(no LaTeX, no markdown, no formatting codes).";

static LATEX_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\item\s*").unwrap());

static LATEX_ENV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:begin|end)\{[a-zA-Z*]+\}").unwrap());

static LATEX_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:textbf|textit|emph)\{([^}]*)\}").unwrap());

static LATEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\textcolor\{[^}]*\}\{([^}]*)\}").unwrap());

static LATEX_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\*?(?:\{[^}]*\})?").unwrap());

static BRACE_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

static MD_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

static MD_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

static MD_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static MD_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s*").unwrap());

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Generate a to-do list for `writing` using `heuristics` as the review
/// criteria. The response is normalized to plain text.
pub fn generate_todo_list(
    provider: &dyn Provider,
    heuristics: &str,
    writing: &str,
) -> Result<String> {
    if heuristics.trim().is_empty() {
        return Err(QuillError::Other("heuristics text is empty".into()));
    }
    if writing.trim().is_empty() {
        return Err(QuillError::Other("no writing to review".into()));
    }

    let prompt = format!(
        "You are a professor providing feedback on a research paper draft. Based on the \
         evaluation heuristics and the student's writing, generate an actionable to-do list.\n\
         \n\
         EVALUATION HEURISTICS (use these as criteria):\n\
         {heuristics}\n\
         \n\
         STUDENT'S LATEST WRITING (review this text):\n\
         {writing}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Review the writing against the provided heuristics\n\
         2. Identify specific areas that need improvement\n\
         3. Generate an actionable to-do list with clear, specific tasks\n\
         4. Format as a PLAIN TEXT numbered list (1. First item, 2. Second item, ...)\n\
         5. Each item must be specific, actionable, and prioritized (most important first)\n\
         6. Output ONLY plain text - no LaTeX, no markdown, no formatting codes\n\
         \n\
         Generate the to-do list in PLAIN TEXT format now:"
    );

    let response = provider.generate(&GenerationRequest::new(prompt).with_system(SYSTEM_PROMPT))?;
    Ok(clean_plain_text(&response))
}

/// Review a project's latest draft and record the to-do list in
/// `TodoHistory.txt`. Returns the generated list.
pub fn review_project(
    provider: &dyn Provider,
    paths: &ProjectPaths,
    store: &MemoryStore,
) -> Result<String> {
    if !paths.writing_history.exists() {
        return Err(QuillError::FileNotFound(paths.writing_history.clone()));
    }
    let content = std::fs::read_to_string(&paths.writing_history)?;
    let latest = history::latest_entry(&content)
        .ok_or_else(|| QuillError::EmptyFile(paths.writing_history.clone()))?;

    let todo_list = generate_todo_list(provider, &store.heuristics_text(), &latest)?;
    history::prepend_todo(&paths.todo_history, &todo_list)?;
    Ok(todo_list)
}

/// Strip LaTeX and markdown formatting that slipped into a response meant
/// to be plain text.
pub fn clean_plain_text(text: &str) -> String {
    let mut text = text.to_string();

    // LaTeX list environments: drop the wrappers, renumber the items.
    text = LATEX_ENV.replace_all(&text, "").into_owned();
    if LATEX_ITEM.is_match(&text) {
        let mut renumbered = String::new();
        for (idx, piece) in LATEX_ITEM.split(&text).enumerate() {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            if idx == 0 {
                renumbered.push_str(piece);
                renumbered.push('\n');
            } else {
                renumbered.push_str(&format!("{idx}. {piece}\n"));
            }
        }
        text = renumbered;
    }

    // Unwrap formatting commands; several passes to handle nesting.
    for _ in 0..3 {
        text = LATEX_WRAPPER.replace_all(&text, "$1").into_owned();
        text = LATEX_COLOR.replace_all(&text, "$1").into_owned();
        text = LATEX_COMMAND.replace_all(&text, "").into_owned();
        text = BRACE_GROUP.replace_all(&text, "$1").into_owned();
    }

    // Markdown emphasis, code, and headings.
    text = MD_BOLD.replace_all(&text, "$1").into_owned();
    text = MD_ITALIC.replace_all(&text, "$1").into_owned();
    text = MD_CODE.replace_all(&text, "$1").into_owned();
    text = MD_HEADING.replace_all(&text, "").into_owned();

    text = BLANK_RUN.replace_all(&text, "\n\n").into_owned();
    text.trim().to_string()
}
