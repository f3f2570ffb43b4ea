//! Versioned history files.
//!
//! `WritingHistory.txt` accumulates drafts as appended blocks with
//! increasing version numbers; the latest entry is the one with the
//! highest version. `TodoHistory.txt` keeps professor to-do lists with the
//! newest block first so the latest list is cheap to read.
//!
//! ```text
//! ================================================================================
//! Version 2 - ReviseParagraph - 2025-11-03 14:12:09
//! ================================================================================
//!
//! <paragraph text>
//! ```

use std::path::Path;
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use crate::error::Result;

const RULE: &str =
    "================================================================================";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static VERSION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^Version\s+(\d+)\b").unwrap());

static ENTRY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^={80}\nVersion\s+(\d+)[^\n]*\n={80}\n").unwrap()
});

static TODO_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^={80}\nTODO LIST #(\d+)\nTimestamp:\s*([^\n]*)\n={80}\n").unwrap()
});

/// A to-do list block from `TodoHistory.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEntry {
    pub number: u32,
    pub timestamp: String,
    pub todo_list: String,
}

/// The version number the next history entry will get.
pub fn next_version(history: &str) -> u32 {
    VERSION_MARKER
        .captures_iter(history)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(1)
}

/// Append a versioned entry to a writing-history file, creating it (and
/// its parent directory) if needed. Returns the assigned version.
pub fn append_entry(path: &Path, text: &str, mode: &str) -> Result<u32> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let version = next_version(&existing);
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);

    let mut content = existing;
    content.push_str(&format!(
        "\n{RULE}\nVersion {version} - {mode} - {timestamp}\n{RULE}\n\n{text}\n\n"
    ));
    std::fs::write(path, content)?;

    Ok(version)
}

/// The text of the highest-version entry, if any.
pub fn latest_entry(history: &str) -> Option<String> {
    let mut best: Option<(u32, String)> = None;

    let headers: Vec<(u32, usize, usize)> = ENTRY_HEADER
        .captures_iter(history)
        .filter_map(|caps| {
            let version = caps[1].parse::<u32>().ok()?;
            let whole = caps.get(0)?;
            Some((version, whole.start(), whole.end()))
        })
        .collect();

    for (idx, (version, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers
            .get(idx + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(history.len());
        let body = history[*body_start..body_end].trim();
        if body.is_empty() {
            continue;
        }
        if best.as_ref().map(|(v, _)| version > v).unwrap_or(true) {
            best = Some((*version, body.to_string()));
        }
    }

    best.map(|(_, text)| text)
}

/// Parse every to-do block, newest first (file order).
pub fn parse_todo_history(content: &str) -> Vec<TodoEntry> {
    let headers: Vec<(u32, String, usize, usize)> = TODO_HEADER
        .captures_iter(content)
        .filter_map(|caps| {
            let number = caps[1].parse::<u32>().ok()?;
            let timestamp = caps[2].trim().to_string();
            let whole = caps.get(0)?;
            Some((number, timestamp, whole.start(), whole.end()))
        })
        .collect();

    let mut entries = Vec::new();
    for (idx, (number, timestamp, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers
            .get(idx + 1)
            .map(|(_, _, next_start, _)| *next_start)
            .unwrap_or(content.len());
        let todo_list = content[*body_start..body_end].trim().to_string();
        if !todo_list.is_empty() {
            entries.push(TodoEntry {
                number: *number,
                timestamp: timestamp.clone(),
                todo_list,
            });
        }
    }
    entries
}

/// The newest to-do list in a history file. A file without block markers
/// is treated as one plain-text list.
pub fn latest_todo(content: &str) -> Option<String> {
    let entries = parse_todo_history(content);
    if let Some(entry) = entries.into_iter().next() {
        return Some(entry.todo_list);
    }
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Insert a new to-do list at the front of a history file, renumbering so
/// the newest block has the highest number. Returns the new block number.
pub fn prepend_todo(path: &Path, todo_list: &str) -> Result<u32> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut entries = parse_todo_history(&existing);
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    entries.insert(
        0,
        TodoEntry {
            number: 0, // renumbered below
            timestamp,
            todo_list: todo_list.trim().to_string(),
        },
    );

    let total = entries.len() as u32;
    let mut content = String::new();
    for (idx, entry) in entries.iter().enumerate() {
        let number = total - idx as u32;
        content.push_str(&format!(
            "{RULE}\nTODO LIST #{number}\nTimestamp: {}\n{RULE}\n\n{}\n\n",
            entry.timestamp, entry.todo_list
        ));
    }
    std::fs::write(path, content)?;

    Ok(total)
}

/// Prepend a prompt-log entry so the most recent prompt is at the top.
pub fn log_prompt(path: &Path, mode: &str, prompt: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let entry = format!(
        "{RULE}\nMode: {mode} | Timestamp: {timestamp}\n{RULE}\n{}\n\n",
        prompt.trim_end()
    );

    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    std::fs::write(path, format!("{entry}{existing}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn next_version_starts_at_one() {
        assert_eq!(next_version(""), 1);
        assert_eq!(next_version("no markers here"), 1);
    }

    #[test]
    fn append_assigns_increasing_versions() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("WritingHistory.txt");

        assert_eq!(append_entry(&path, "first draft", "NewParagraph").unwrap(), 1);
        assert_eq!(append_entry(&path, "second draft", "ReviseParagraph").unwrap(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(latest_entry(&content).as_deref(), Some("second draft"));
    }

    #[test]
    fn latest_entry_prefers_highest_version() {
        let content = format!(
            "{RULE}\nVersion 3 - NewParagraph - 2025-01-01 10:00:00\n{RULE}\n\nthird\n\n\
             {RULE}\nVersion 1 - NewParagraph - 2025-01-01 09:00:00\n{RULE}\n\nfirst\n\n"
        );
        assert_eq!(latest_entry(&content).as_deref(), Some("third"));
    }

    #[test]
    fn latest_entry_of_empty_history_is_none() {
        assert_eq!(latest_entry(""), None);
    }

    #[test]
    fn todo_round_trip_renumbers_latest_first() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("TodoHistory.txt");

        prepend_todo(&path, "1. Fix the claim").unwrap();
        prepend_todo(&path, "1. Add citations\n2. Tighten prose").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let entries = parse_todo_history(&content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].number, 2);
        assert!(entries[0].todo_list.starts_with("1. Add citations"));
        assert_eq!(entries[1].number, 1);

        assert_eq!(
            latest_todo(&content).as_deref(),
            Some("1. Add citations\n2. Tighten prose")
        );
    }

    #[test]
    fn plain_text_todo_file_is_one_list() {
        assert_eq!(
            latest_todo("1. Just a plain list").as_deref(),
            Some("1. Just a plain list")
        );
        assert_eq!(latest_todo("   "), None);
    }

    #[test]
    fn prompt_log_puts_newest_first() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("prompt.txt");

        log_prompt(&path, "NewParagraph", "older prompt").unwrap();
        log_prompt(&path, "ReviseParagraph", "newer prompt").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let newer = content.find("newer prompt").unwrap();
        let older = content.find("older prompt").unwrap();
        assert!(newer < older);
        assert!(content.contains("Mode: ReviseParagraph"));
    }
}
