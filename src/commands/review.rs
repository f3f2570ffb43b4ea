//! Ask the professor for a to-do list on the latest draft.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::memory::MemoryStore;
use crate::professor;
use crate::project::ProjectPaths;
use crate::provider::{select_provider, ProviderKind};

/// Options for the review command
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Project name
    pub project: String,
}

/// Execute the review command
pub fn execute_review(options: ReviewOptions, config: &Config, kind: ProviderKind) -> Result<()> {
    let paths = ProjectPaths::require(&config.projects_dir, &options.project)?;
    let provider = select_provider(kind, config)?;
    let store = MemoryStore::open(&config.global_memory);

    let spinner = super::provider_spinner(provider.name(), "Reviewing latest draft");
    let todo_list = professor::review_project(provider.as_ref(), &paths, &store);
    spinner.finish_and_clear();
    let todo_list = todo_list?;

    println!("{} To-do list generated", style("✓").green());
    println!("  Saved to: {}", paths.todo_history.display());

    println!("\n{}", style("To-do list:").bold());
    const PREVIEW_CHARS: usize = 500;
    if todo_list.chars().count() > PREVIEW_CHARS {
        let preview: String = todo_list.chars().take(PREVIEW_CHARS).collect();
        println!("{preview}...");
    } else {
        println!("{todo_list}");
    }
    println!(
        "\nRun {} to apply it",
        style(format!("quill apply {}", options.project)).cyan()
    );

    Ok(())
}
