//! Bullet-section memory format.
//!
//! Memory files group free-text bullets under named sections:
//!
//! ```text
//! ===== Key Ideas =====
//! • Differential privacy bounds the influence of any single record
//! • Noise calibration trades utility for privacy
//!
//! ===== Previous Content =====
//! • The introduction motivates the privacy/utility tradeoff
//! ```
//!
//! Parsing is line oriented: a header line opens a section, bullet lines
//! (`•` or `-`) append entries to it, and anything else between headers is
//! ignored. Serialization emits sections in insertion order with the `•`
//! marker, so `parse(serialize(doc)) == doc` holds for documents whose
//! entries are non-empty and marker free.

pub mod store;

use std::path::Path;

pub use store::MemoryStore;

/// Well-known section names used across the memory tiers.
pub mod sections {
    pub const KEY_IDEAS: &str = "Key Ideas";
    pub const PREVIOUS_CONTENT: &str = "Previous Content";
    pub const OUTLINES: &str = "Outlines";
    pub const WRITING_CONTEXT: &str = "Writing Context";
    pub const TOPIC_SENTENCE: &str = "Topic Sentence";
    pub const BULLET_POINTS: &str = "Bullet Points";
    pub const TEMPLATE_FLOW: &str = "Template Flow";
    pub const CURRENT_PARAGRAPH: &str = "Current Paragraph";
    pub const REVISION_FEEDBACK: &str = "Revision Feedback";
    pub const OUTPUT: &str = "Output";
    pub const WRITING_HEURISTICS: &str = "Writing Heuristics";
    pub const TRANSITIONS: &str = "Transitions";
}

const HEADER_MARKER: &str = "=====";
const BULLET: &str = "• ";

/// A named group of bullet entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    pub name: String,
    pub entries: Vec<String>,
}

/// An ordered collection of memory sections, round-tripped to and from
/// the flat-file format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    sections: Vec<MemorySection>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse memory-file text. Never fails: malformed lines are skipped.
    pub fn parse(input: &str) -> Self {
        let mut doc = Self::new();
        let mut current: Option<MemorySection> = None;

        for raw in input.lines() {
            let line = raw.trim();

            if let Some(name) = header_name(line) {
                if let Some(section) = current.take() {
                    doc.insert(section);
                }
                current = Some(MemorySection {
                    name,
                    entries: Vec::new(),
                });
            } else if line.starts_with('•') || line.starts_with('-') {
                let entry = line.trim_start_matches(['•', '-', ' ']).trim();
                if !entry.is_empty() {
                    if let Some(section) = current.as_mut() {
                        section.entries.push(entry.to_string());
                    }
                }
            }
            // Anything else between headers is ignored.
        }

        if let Some(section) = current {
            doc.insert(section);
        }

        doc
    }

    /// Render the document back to flat-file text.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(HEADER_MARKER);
            out.push(' ');
            out.push_str(&section.name);
            out.push(' ');
            out.push_str(HEADER_MARKER);
            out.push('\n');
            for entry in &section.entries {
                out.push_str(BULLET);
                out.push_str(entry);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Read and parse a memory file.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Serialize to a file, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.serialize())?;
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&MemorySection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Entries of a section; empty when the section is absent.
    pub fn entries(&self, name: &str) -> &[String] {
        self.section(name).map(|s| s.entries.as_slice()).unwrap_or(&[])
    }

    pub fn first_entry(&self, name: &str) -> Option<&str> {
        self.entries(name).first().map(String::as_str)
    }

    /// Entries joined with newlines; `None` when absent or empty.
    pub fn joined(&self, name: &str) -> Option<String> {
        let entries = self.entries(name);
        if entries.is_empty() {
            None
        } else {
            Some(entries.join("\n"))
        }
    }

    /// Replace a section's entries, preserving its position if it already
    /// exists; otherwise the section is appended.
    pub fn set<I, S>(&mut self, name: &str, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.entries = entries,
            None => self.sections.push(MemorySection {
                name: name.to_string(),
                entries,
            }),
        }
    }

    /// Append a section with no entries if it does not exist yet.
    pub fn ensure_section(&mut self, name: &str) {
        if self.section(name).is_none() {
            self.sections.push(MemorySection {
                name: name.to_string(),
                entries: Vec::new(),
            });
        }
    }

    pub fn push_entry(&mut self, name: &str, entry: impl Into<String>) {
        self.ensure_section(name);
        if let Some(section) = self.sections.iter_mut().find(|s| s.name == name) {
            section.entries.push(entry.into());
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &MemorySection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn insert(&mut self, section: MemorySection) {
        // A repeated header replaces the earlier entries but keeps the
        // original position.
        match self.sections.iter_mut().find(|s| s.name == section.name) {
            Some(existing) => existing.entries = section.entries,
            None => self.sections.push(section),
        }
    }
}

/// Section name from a header line, or `None` if the line is not a header.
fn header_name(line: &str) -> Option<String> {
    if line.starts_with(HEADER_MARKER) && line.ends_with(HEADER_MARKER) {
        Some(line.chars().filter(|c| *c != '=').collect::<String>().trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.set(sections::KEY_IDEAS, ["first idea", "second idea"]);
        doc.set(sections::PREVIOUS_CONTENT, ["a prior sentence"]);
        doc
    }

    #[test]
    fn parse_empty_input_yields_empty_document() {
        assert!(MemoryDocument::parse("").is_empty());
    }

    #[test]
    fn round_trip_preserves_document() {
        let doc = sample();
        assert_eq!(MemoryDocument::parse(&doc.serialize()), doc);
    }

    #[test]
    fn serialize_emits_sections_in_insertion_order() {
        let text = sample().serialize();
        assert_eq!(
            text,
            "===== Key Ideas =====\n\
             • first idea\n\
             • second idea\n\
             \n\
             ===== Previous Content =====\n\
             • a prior sentence\n\
             \n"
        );
    }

    #[test]
    fn parse_accepts_dash_bullets() {
        let doc = MemoryDocument::parse("===== Key Ideas =====\n- dashed entry\n");
        assert_eq!(doc.entries(sections::KEY_IDEAS), ["dashed entry"]);
    }

    #[test]
    fn lines_outside_sections_are_ignored() {
        let doc = MemoryDocument::parse(
            "stray prose\n===== Key Ideas =====\nnot a bullet\n• kept\n\nmore prose\n",
        );
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.entries(sections::KEY_IDEAS), ["kept"]);
    }

    #[test]
    fn empty_bullets_are_dropped() {
        let doc = MemoryDocument::parse("===== Key Ideas =====\n•\n• \n• real\n");
        assert_eq!(doc.entries(sections::KEY_IDEAS), ["real"]);
    }

    #[test]
    fn repeated_header_replaces_entries_in_place() {
        let doc = MemoryDocument::parse(
            "===== A =====\n• one\n\n===== B =====\n• two\n\n===== A =====\n• three\n",
        );
        let names: Vec<&str> = doc.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(doc.entries("A"), ["three"]);
    }

    #[test]
    fn set_replaces_without_reordering() {
        let mut doc = sample();
        doc.set(sections::KEY_IDEAS, ["replaced"]);
        let names: Vec<&str> = doc.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Key Ideas", "Previous Content"]);
        assert_eq!(doc.entries(sections::KEY_IDEAS), ["replaced"]);
    }

    #[test]
    fn missing_section_reads_as_empty() {
        let doc = sample();
        assert!(doc.entries("Outlines").is_empty());
        assert_eq!(doc.joined("Outlines"), None);
        assert_eq!(doc.first_entry(sections::KEY_IDEAS), Some("first idea"));
    }
}
