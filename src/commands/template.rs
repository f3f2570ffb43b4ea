//! Generate a writing template from a reference section.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::Config;
use crate::memory::sections;
use crate::provider::{select_provider, ProviderKind};
use crate::template::{analyze_section, render_template};

/// Options for the template command
#[derive(Debug, Clone)]
pub struct TemplateOptions {
    /// Plain-text file with the reference section
    pub file: PathBuf,
    /// Section name given to the model for context
    pub section_name: String,
    /// Output template file (default: `<file stem>_template.txt`)
    pub output: Option<PathBuf>,
}

/// Execute the template command
pub fn execute_template(
    options: TemplateOptions,
    config: &Config,
    kind: ProviderKind,
) -> Result<()> {
    let text = std::fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read {}", options.file.display()))?;

    let provider = select_provider(kind, config)?;

    let spinner = super::provider_spinner(provider.name(), "Analyzing sentence roles");
    let analysis = analyze_section(provider.as_ref(), &text, &options.section_name);
    spinner.finish_and_clear();
    let analysis = analysis?;

    let doc = render_template(&analysis);

    let output = options.output.clone().unwrap_or_else(|| {
        let stem = options
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "section".to_string());
        options.file.with_file_name(format!("{stem}_template.txt"))
    });
    doc.save(&output)?;

    println!(
        "{} Template generated from {} sentences",
        style("✓").green(),
        analysis.sentence_analyses.len()
    );
    println!("  Saved to: {}", output.display());

    if let Some(template) = doc.first_entry(sections::TEMPLATE_FLOW) {
        println!("\n{}", style("Template:").bold());
        println!("{template}");
    }

    Ok(())
}
