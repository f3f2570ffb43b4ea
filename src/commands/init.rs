//! Initialize a new writing project.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::config::Config;
use crate::memory::MemoryStore;
use crate::project::{create_project, ProjectPaths};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project name
    pub name: String,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions, config: &Config) -> Result<()> {
    let existing = ProjectPaths::resolve(&config.projects_dir, &options.name);
    if existing.exists() && !options.yes {
        let reseed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Project '{}' already exists. Re-create any missing files?",
                options.name
            ))
            .default(true)
            .interact()?;
        if !reseed {
            println!("{} Nothing to do", style("✓").green());
            return Ok(());
        }
    }

    let paths = create_project(&config.projects_dir, &options.name)?;

    // Seed the global memory file on first use so heuristics are editable.
    let store = MemoryStore::open(&config.global_memory);
    if store.seed_global()? {
        println!(
            "{} Created {} with default writing heuristics",
            style("✓").green(),
            config.global_memory.display()
        );
    }

    println!(
        "{} Project '{}' created at {}",
        style("✓").green(),
        options.name,
        paths.root.display()
    );
    println!("  Structure:");
    println!("    Memory/ProjectMemory.txt    key ideas and distilled content");
    println!("    Memory/TempMemory.txt       paragraph working set");
    println!("    Intermediate/               history and prompt logs");
    println!("    Output/                     plaintext, LaTeX, staged output");

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  1. Add ideas and a topic sentence to {}",
        style("Memory/TempMemory.txt").cyan()
    );
    println!(
        "  2. Run {} to draft a paragraph",
        style(format!("quill write {}", options.name)).cyan()
    );

    Ok(())
}
