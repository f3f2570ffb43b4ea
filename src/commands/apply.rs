//! Revise the latest draft against the newest to-do list.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::project::ProjectPaths;
use crate::provider::{select_provider, ProviderKind};
use crate::writer::Writer;

/// Options for the apply command
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Project name
    pub project: String,
}

/// Execute the apply command
pub fn execute_apply(options: ApplyOptions, config: &Config, kind: ProviderKind) -> Result<()> {
    let paths = ProjectPaths::require(&config.projects_dir, &options.project)?;
    let provider = select_provider(kind, config)?;

    let writer = Writer::new(paths, provider.as_ref(), config.generation.clone());

    let spinner = super::provider_spinner(provider.name(), "Applying to-do list");
    let result = writer.apply_todo();
    spinner.finish_and_clear();
    let result = result?;

    println!(
        "{} Revision complete (version {})",
        style("✓").green(),
        result.version
    );
    println!("\n{}", style("Revised paragraph:").bold());
    println!("{}", "-".repeat(80));
    println!("{}", result.text);
    println!("{}", "-".repeat(80));

    Ok(())
}
