//! Inline comment extraction.
//!
//! Revision feedback can be embedded directly in paragraph text as
//! brace-delimited spans: `"This sentence needs work. {Make it concise.}"`.
//! Extraction removes the spans, records each comment with the sentence it
//! follows, and normalizes the whitespace left behind. Unbalanced braces
//! never match, so malformed input passes through untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Non-overlapping `{...}` spans; nesting is not supported.
static COMMENT_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^}]*)\}").unwrap());

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]*\n\s*\n+").unwrap());

/// A comment pulled out of paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineComment {
    /// The feedback text inside the braces.
    pub comment: String,
    /// Sentence fragment immediately preceding the span, when one exists.
    pub target_sentence: Option<String>,
}

/// Extract all inline comments from `text`.
///
/// Returns the text with every span removed (whitespace collapsed) and the
/// ordered comments. Empty spans (`{}`) are removed but produce no comment.
/// When no span matches at all the input is returned verbatim.
pub fn extract_inline_comments(text: &str) -> (String, Vec<InlineComment>) {
    let mut comments = Vec::new();
    let mut cleaned = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut matched = false;

    for caps in COMMENT_SPAN.captures_iter(text) {
        matched = true;
        let span = caps.get(0).expect("match always has group 0");
        cleaned.push_str(&text[last_end..span.start()]);

        let body = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if !body.is_empty() {
            comments.push(InlineComment {
                comment: body.to_string(),
                target_sentence: sentence_before(text, span.start()),
            });
        }

        last_end = span.end();
    }

    if !matched {
        return (text.to_string(), comments);
    }

    cleaned.push_str(&text[last_end..]);

    let cleaned = MULTI_SPACE.replace_all(&cleaned, " ");
    let cleaned = BLANK_RUN.replace_all(&cleaned, "\n\n");
    (cleaned.trim().to_string(), comments)
}

/// Render comments as numbered sentence/feedback pairs for a prompt.
pub fn format_inline_feedback(comments: &[InlineComment]) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, entry) in comments.iter().enumerate() {
        let n = idx + 1;
        match entry.target_sentence.as_deref() {
            Some(sentence) if !sentence.is_empty() => {
                lines.push(format!("{n}. Sentence: {sentence}"));
                lines.push(format!("   Feedback: {}", entry.comment));
            }
            _ => lines.push(format!("{n}. Feedback: {}", entry.comment)),
        }
    }
    lines
}

/// Best-effort sentence (or clause) immediately preceding a comment span,
/// so the model knows which sentence the feedback refers to.
fn sentence_before(text: &str, span_start: usize) -> Option<String> {
    let preceding = text[..span_start].trim_end();
    // Skip the terminator of the sentence itself so a comment placed right
    // after "X." targets X rather than an empty fragment.
    let scan = preceding.trim_end_matches(['.', '?', '!']);

    let start = scan
        .rfind(['.', '?', '!', '\n'])
        .map(|i| i + 1)
        .unwrap_or(0);

    let sentence = scan[start..].trim();
    if sentence.is_empty() {
        None
    } else {
        Some(sentence.to_string())
    }
}
