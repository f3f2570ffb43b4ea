//! Revise the current paragraph using feedback and inline comments.

use anyhow::Result;
use console::style;
use similar::{ChangeTag, TextDiff};

use crate::config::Config;
use crate::project::ProjectPaths;
use crate::provider::{select_provider, ProviderKind};
use crate::writer::{history, Writer};

/// Options for the revise command
#[derive(Debug, Clone)]
pub struct ReviseOptions {
    /// Project name
    pub project: String,
    /// Show a diff against the previous version
    pub diff: bool,
}

/// Execute the revise command
pub fn execute_revise(options: ReviseOptions, config: &Config, kind: ProviderKind) -> Result<()> {
    let paths = ProjectPaths::require(&config.projects_dir, &options.project)?;
    let provider = select_provider(kind, config)?;

    // Capture the previous version before it is superseded.
    let previous = if options.diff && paths.writing_history.exists() {
        let content = std::fs::read_to_string(&paths.writing_history)?;
        history::latest_entry(&content)
    } else {
        None
    };

    let writer = Writer::new(paths, provider.as_ref(), config.generation.clone());

    let spinner = super::provider_spinner(provider.name(), "Revising paragraph");
    let result = writer.revise();
    spinner.finish_and_clear();
    let result = result?;

    println!(
        "{} Paragraph revised (version {})",
        style("✓").green(),
        result.version
    );

    if let Some(previous) = previous {
        println!("\n{}", style("Changes from previous version:").bold());
        print_diff(&previous, &result.text);
    }

    println!("\n{}", style("Revised paragraph:").bold());
    println!("{}", "-".repeat(80));
    println!("{}", result.text);
    println!("{}", "-".repeat(80));

    Ok(())
}

fn print_diff(old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", style(format!("- {change}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+ {change}")).green()),
            ChangeTag::Equal => print!("  {change}"),
        }
    }
}
