//! Distill staged output into project memory.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::distill;
use crate::project::ProjectPaths;
use crate::provider::{select_provider, ProviderKind};

/// Options for the remember command
#[derive(Debug, Clone)]
pub struct RememberOptions {
    /// Project name
    pub project: String,
}

/// Execute the remember command
pub fn execute_remember(
    options: RememberOptions,
    config: &Config,
    kind: ProviderKind,
) -> Result<()> {
    let paths = ProjectPaths::require(&config.projects_dir, &options.project)?;
    let provider = select_provider(kind, config)?;

    println!("  StagedOutput:  {}", paths.staged_output.display());
    println!("  ProjectMemory: {}", paths.project_memory.display());

    let spinner = super::provider_spinner(provider.name(), "Summarizing staged output");
    let sentences = distill::update_previous_content(
        provider.as_ref(),
        &paths,
        config.generation.summary_sentences,
    );
    spinner.finish_and_clear();
    let sentences = sentences?;

    if sentences.is_empty() {
        println!(
            "{} No sentences extracted from staged output",
            style("⚠").yellow()
        );
        return Ok(());
    }

    println!(
        "{} Updated 'Previous Content' with {} sentences:",
        style("✓").green(),
        sentences.len()
    );
    for (idx, sentence) in sentences.iter().enumerate() {
        println!("  {}. {}", idx + 1, super::preview(sentence, 80));
    }

    Ok(())
}
