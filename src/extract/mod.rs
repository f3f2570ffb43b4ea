//! Section extraction from paper text.
//!
//! Operates on plain text already pulled out of a PDF. Two strategies:
//! a rule-based scan for conventional section headers, and an AI-assisted
//! path that asks the model for the section verbatim and falls back to the
//! rule-based scan when the model cannot find it.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::provider::{GenerationRequest, Provider};

/// Conventional paper section titles, in reading order.
pub const SECTION_TITLES: &[&str] = &[
    "Abstract",
    "Introduction",
    "Related Work",
    "Background",
    "Methodology",
    "Methods",
    "Approach",
    "Results",
    "Findings",
    "Discussion",
    "Evaluation",
    "Experiments",
    "Conclusion",
    "Conclusions",
    "Future Work",
    "Acknowledgments",
    "References",
];

/// Sentinel the model is told to return when a section is absent.
const NOT_FOUND: &str = "NOT_FOUND";

/// One section written to disk by [`extract_all`].
#[derive(Debug, Clone)]
pub struct ExtractedSection {
    pub index: usize,
    pub title: String,
    pub path: PathBuf,
    pub chars: usize,
}

/// Header pattern for a title: bare, numbered (`3.`, `3.1`), or markdown
/// (`##`), optionally ending with a colon.
fn header_pattern(title: &str) -> Regex {
    let escaped = regex::escape(title);
    Regex::new(&format!(
        r"(?i)^\s*(?:\d+(?:\.\d+)*\.?\s+|#{{1,3}}\s*)?{escaped}\s*:?\s*$"
    ))
    .expect("valid header pattern")
}

/// Rule-based extraction: find the title's header line and collect text
/// until the next known section header.
pub fn extract_section_by_title(text: &str, title: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let target = header_pattern(title);

    let start = lines.iter().position(|line| target.is_match(line))?;

    let other_headers: Vec<Regex> = SECTION_TITLES
        .iter()
        .filter(|other| !other.eq_ignore_ascii_case(title))
        .map(|other| header_pattern(other))
        .collect();

    let end = lines[start + 1..]
        .iter()
        .position(|line| other_headers.iter().any(|re| re.is_match(line)))
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());

    let body = lines[start + 1..end].join("\n").trim().to_string();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// Extract one section, preferring the model when a provider is given.
pub fn extract_section(
    provider: Option<&dyn Provider>,
    text: &str,
    title: &str,
) -> Result<Option<String>> {
    if let Some(provider) = provider {
        let prompt = format!(
            "Below is the full plain text of a research paper. Return the complete text of \
             the \"{title}\" section, verbatim, without the section heading itself.\n\
             If the paper has no such section, reply with exactly {NOT_FOUND} and nothing else.\n\
             \n\
             Paper text:\n\
             \n\
             {text}"
        );
        match provider.generate(&GenerationRequest::new(prompt)) {
            Ok(response) => {
                let response = response.trim();
                if !response.is_empty() && response != NOT_FOUND {
                    return Ok(Some(response.to_string()));
                }
                debug!(title, "model reported section missing; trying rule-based scan");
            }
            Err(e) => {
                debug!(title, error = %e, "model extraction failed; trying rule-based scan");
            }
        }
    }

    Ok(extract_section_by_title(text, title))
}

/// Extract every conventional section and write one numbered file per
/// section under `<out_dir>/<paper_name>/`.
pub fn extract_all(
    provider: Option<&dyn Provider>,
    text: &str,
    paper_name: &str,
    out_dir: &Path,
) -> Result<Vec<ExtractedSection>> {
    let paper_dir = out_dir.join(paper_name);
    std::fs::create_dir_all(&paper_dir)?;

    let mut extracted = Vec::new();
    let mut index = 1;

    for title in SECTION_TITLES {
        let Some(content) = extract_section(provider, text, title)? else {
            continue;
        };

        let file_name = format!("{index}_{}.txt", title.to_lowercase().replace(' ', "_"));
        let path = paper_dir.join(file_name);
        std::fs::write(&path, &content)?;

        extracted.push(ExtractedSection {
            index,
            title: title.to_string(),
            chars: content.chars().count(),
            path,
        });
        index += 1;
    }

    Ok(extracted)
}
