//! Draft a new paragraph from project memory.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::project::ProjectPaths;
use crate::provider::{select_provider, ProviderKind};
use crate::writer::Writer;

/// Options for the write command
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Project name
    pub project: String,
}

/// Execute the write command
pub fn execute_write(options: WriteOptions, config: &Config, kind: ProviderKind) -> Result<()> {
    let paths = ProjectPaths::require(&config.projects_dir, &options.project)?;
    let provider = select_provider(kind, config)?;

    let writer = Writer::new(paths, provider.as_ref(), config.generation.clone());

    let spinner = super::provider_spinner(provider.name(), "Drafting paragraph");
    let result = writer.draft();
    spinner.finish_and_clear();
    let result = result?;

    println!(
        "{} Paragraph written (version {})",
        style("✓").green(),
        result.version
    );
    println!(
        "  History: {}",
        writer.paths().writing_history.display()
    );
    println!("  LaTeX:   {}", writer.paths().output_latex.display());
    println!("\n{}", style("Generated paragraph:").bold());
    println!("{}", "-".repeat(80));
    println!("{}", result.text);
    println!("{}", "-".repeat(80));

    Ok(())
}
