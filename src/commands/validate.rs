//! Validate a memory file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::memory::MemoryDocument;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Memory file to validate
    pub file: PathBuf,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions) -> Result<()> {
    let content = std::fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read {}", options.file.display()))?;

    let doc = MemoryDocument::parse(&content);

    if doc.is_empty() {
        println!(
            "{} {}: no sections found",
            style("⚠").yellow(),
            options.file.display()
        );
        return Ok(());
    }

    println!(
        "{} {}: {} sections",
        style("✓").green(),
        options.file.display(),
        doc.len()
    );
    for section in doc.sections() {
        println!("    {} ({} entries)", section.name, section.entries.len());
    }

    // The format is stable when a reparse of the serialization matches.
    let reparsed = MemoryDocument::parse(&doc.serialize());
    if reparsed == doc {
        println!("{} Round-trip check passed", style("✓").green());
    } else {
        eprintln!("{} Round-trip check failed", style("✗").red());
        std::process::exit(1);
    }

    if doc.serialize() != content {
        println!(
            "{} File is not in canonical form (bullets or spacing will be rewritten on save)",
            style("⚠").yellow()
        );
    }

    Ok(())
}
