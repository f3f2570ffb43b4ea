//! LaTeX rendering of generated paragraphs.

use tracing::warn;

use crate::provider::{GenerationRequest, Provider};

/// Escape LaTeX special characters. Backslash goes first so the escapes
/// themselves survive.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '^' => out.push_str("\\textasciicircum{}"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a paragraph to LaTeX via the model; falls back to plain
/// character escaping when the call fails.
pub fn render_latex(provider: &dyn Provider, text: &str) -> String {
    let prompt = format!(
        "Convert the following academic text to LaTeX format.\n\
         Preserve the meaning and structure. Use appropriate LaTeX commands for formatting.\n\
         \n\
         Text:\n\
         {text}\n\
         \n\
         Output only the LaTeX code, without any explanations or markdown formatting."
    );

    match provider.generate(&GenerationRequest::new(prompt)) {
        Ok(response) => strip_code_fences(&response).to_string(),
        Err(e) => {
            warn!(error = %e, "LaTeX conversion failed; using basic escaping");
            escape_latex(text)
        }
    }
}

/// Remove a surrounding markdown code fence, if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let after_open = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return trimmed,
    };
    match after_open.rfind("```") {
        Some(idx) => after_open[..idx].trim(),
        None => after_open.trim(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_latex("a & b _ 10%"), "a \\& b \\_ 10\\%");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
    }

    #[test]
    fn backslash_is_escaped_first() {
        assert_eq!(escape_latex("\\&"), "\\textbackslash{}\\&");
    }

    #[test]
    fn strips_fenced_blocks() {
        assert_eq!(strip_code_fences("```latex\n\\emph{x}\n```"), "\\emph{x}");
        assert_eq!(strip_code_fences("```\nbody\n```"), "body");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_code_fences("  plain  "), "plain");
    }
}
