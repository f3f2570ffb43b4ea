//! Extract sections from paper text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::Config;
use crate::extract::{extract_all, extract_section};
use crate::provider::{select_provider, Provider, ProviderKind};

/// Options for the extract command
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Plain-text paper file
    pub file: PathBuf,
    /// Extract only this section (default: all conventional sections)
    pub section: Option<String>,
    /// Output directory for extracted sections
    pub out: PathBuf,
    /// Name for the paper subdirectory (default: file stem)
    pub paper_name: Option<String>,
    /// Disable AI-assisted extraction
    pub no_ai: bool,
}

/// Execute the extract command
pub fn execute_extract(options: ExtractOptions, config: &Config, kind: ProviderKind) -> Result<()> {
    let text = std::fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read {}", options.file.display()))?;

    let provider: Option<Box<dyn Provider>> = if options.no_ai {
        None
    } else {
        Some(select_provider(kind, config)?)
    };
    let provider_ref = provider.as_deref();

    if let Some(section) = &options.section {
        let spinner = super::provider_spinner(
            provider_ref.map(|p| p.name()).unwrap_or("rule-based"),
            &format!("Extracting '{section}'"),
        );
        let result = extract_section(provider_ref, &text, section);
        spinner.finish_and_clear();

        match result? {
            Some(content) => {
                println!("{} Section '{section}' found", style("✓").green());
                println!("{content}");
            }
            None => {
                eprintln!("{} Section '{section}' not found", style("✗").red());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let paper_name = options
        .paper_name
        .clone()
        .or_else(|| {
            options
                .file
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "paper".to_string());

    println!("Extracting sections from: {}", options.file.display());
    println!("Output directory: {}", options.out.join(&paper_name).display());

    let extracted = extract_all(provider_ref, &text, &paper_name, &options.out)?;

    if extracted.is_empty() {
        println!("{} No sections found", style("⚠").yellow());
        return Ok(());
    }

    for section in &extracted {
        println!(
            "  {} [{}] {} ({} chars)",
            style("✓").green(),
            section.index,
            section.title,
            section.chars
        );
    }
    println!(
        "\n{} Extracted {} sections",
        style("✓").green(),
        extracted.len()
    );

    Ok(())
}
