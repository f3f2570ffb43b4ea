//! Show project status, or list projects.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::memory::MemoryStore;
use crate::project::{scan_projects, ProjectPaths};
use crate::writer::history;

/// Options for the status command
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Project name; omit to list all projects
    pub project: Option<String>,
}

/// Execute the status command
pub fn execute_status(options: StatusOptions, config: &Config) -> Result<()> {
    let Some(project) = &options.project else {
        let names = scan_projects(&config.projects_dir);
        if names.is_empty() {
            println!(
                "No projects under {} (run 'quill init <name>')",
                config.projects_dir.display()
            );
            return Ok(());
        }
        println!("{}", style("Projects:").bold());
        for name in names {
            println!("  {name}");
        }
        return Ok(());
    };

    let paths = ProjectPaths::require(&config.projects_dir, project)?;

    println!("{} {}", style("Project:").bold(), paths.root.display());

    let project_doc = MemoryStore::load_project(&paths.project_memory)?;
    println!("\n{}", style("Project memory:").bold());
    for section in project_doc.sections() {
        println!("    {} ({} entries)", section.name, section.entries.len());
    }

    let temp_doc = MemoryStore::load_paragraph(&paths.temp_memory)?;
    println!("\n{}", style("Paragraph memory:").bold());
    for section in temp_doc.sections() {
        println!("    {} ({} entries)", section.name, section.entries.len());
    }

    let drafts = if paths.writing_history.exists() {
        let content = std::fs::read_to_string(&paths.writing_history)?;
        history::next_version(&content) - 1
    } else {
        0
    };
    let todos = if paths.todo_history.exists() {
        let content = std::fs::read_to_string(&paths.todo_history)?;
        history::parse_todo_history(&content).len()
    } else {
        0
    };

    println!("\n{}", style("History:").bold());
    println!("    {drafts} draft versions");
    println!("    {todos} to-do lists");

    Ok(())
}
