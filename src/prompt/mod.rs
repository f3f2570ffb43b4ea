//! Prompt assembly.
//!
//! Prompts reuse the memory-file section format so the model sees the same
//! `===== Title =====` blocks the user edits. Empty content is skipped
//! rather than emitted as a bare header.

const HEADER_MARKER: &str = "=====";

/// Builds a sectioned natural-language prompt.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    /// Start a prompt with a preamble instruction line.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            parts: vec![preamble.into()],
        }
    }

    /// Add a section from free text; skipped when `content` is `None` or
    /// blank.
    pub fn section(mut self, title: &str, content: Option<&str>) -> Self {
        if let Some(content) = content {
            let content = content.trim();
            if !content.is_empty() {
                self.push_header(title);
                for line in content.lines() {
                    self.parts.push(line.to_string());
                }
                self.parts.push(String::new());
            }
        }
        self
    }

    /// Add a section whose entries are rendered as `- ` bullets. Entries
    /// that already carry a marker are kept as-is; blank entries and empty
    /// sections are skipped.
    pub fn bullet_section(mut self, title: &str, entries: &[String]) -> Self {
        let entries: Vec<&str> = entries
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect();
        if !entries.is_empty() {
            self.push_header(title);
            for entry in entries {
                if entry.starts_with('-') || entry.starts_with('•') {
                    self.parts.push(entry.to_string());
                } else {
                    self.parts.push(format!("- {entry}"));
                }
            }
            self.parts.push(String::new());
        }
        self
    }

    /// Add a section of preformatted lines (no bulletizing).
    pub fn line_section(mut self, title: &str, lines: &[String]) -> Self {
        if !lines.is_empty() {
            self.push_header(title);
            for line in lines {
                self.parts.push(line.clone());
            }
            self.parts.push(String::new());
        }
        self
    }

    /// Add the closing "Output Requirements" section.
    pub fn requirements(self, requirements: &[String]) -> Self {
        let lines: Vec<String> = requirements
            .iter()
            .map(|r| format!("- {r}"))
            .collect();
        self.line_section("Output Requirements", &lines)
    }

    /// Render the final prompt, ending with a single newline.
    pub fn build(self) -> String {
        let mut prompt = self.parts.join("\n");
        prompt.truncate(prompt.trim_end().len());
        prompt.push('\n');
        prompt
    }

    fn push_header(&mut self, title: &str) {
        self.parts
            .push(format!("{HEADER_MARKER} {title} {HEADER_MARKER}"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sections_follow_memory_format() {
        let prompt = PromptBuilder::new("Write one paragraph.")
            .section("Topic Sentence", Some("Privacy matters."))
            .bullet_section("Bullet Points", &["first".into(), "- second".into()])
            .build();
        assert_eq!(
            prompt,
            "Write one paragraph.\n\
             ===== Topic Sentence =====\n\
             Privacy matters.\n\
             \n\
             ===== Bullet Points =====\n\
             - first\n\
             - second\n"
        );
    }

    #[test]
    fn empty_content_is_skipped() {
        let prompt = PromptBuilder::new("Preamble.")
            .section("Template Flow", None)
            .section("Writing Context", Some("   "))
            .bullet_section("Bullet Points", &["  ".into()])
            .build();
        assert_eq!(prompt, "Preamble.\n");
    }

    #[test]
    fn requirements_render_as_dashes() {
        let prompt = PromptBuilder::new("Go.")
            .requirements(&["Return only the paragraph.".into()])
            .build();
        assert!(prompt.contains("===== Output Requirements ====="));
        assert!(prompt.contains("- Return only the paragraph."));
    }

    #[test]
    fn build_ends_with_single_newline() {
        let prompt = PromptBuilder::new("Line.")
            .section("A", Some("body"))
            .build();
        assert!(prompt.ends_with("body\n"));
        assert!(!prompt.ends_with("\n\n"));
    }
}
