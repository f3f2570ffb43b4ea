#![forbid(unsafe_code)]
//! Quill command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quill::commands::{
    execute_apply, execute_extract, execute_init, execute_remember, execute_review,
    execute_revise, execute_status, execute_template, execute_validate, execute_write,
    ApplyOptions, ExtractOptions, InitOptions, RememberOptions, ReviewOptions, ReviseOptions,
    StatusOptions, TemplateOptions, ValidateOptions, WriteOptions,
};
use quill::provider::ProviderKind;
use quill::Config;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Memory-driven academic writing assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".quill.config.json")]
    config: PathBuf,

    /// AI provider override (default from config)
    #[arg(short, long, global = true, value_enum)]
    provider: Option<ProviderArg>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new writing project
    Init {
        /// Project name
        name: String,

        /// Skip interactive prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Draft a new paragraph from project memory
    Write {
        /// Project name
        project: String,
    },

    /// Revise the current paragraph using feedback and inline {comments}
    Revise {
        /// Project name
        project: String,

        /// Show a diff against the previous version
        #[arg(long)]
        diff: bool,
    },

    /// Generate a professor to-do list for the latest draft
    Review {
        /// Project name
        project: String,
    },

    /// Revise the latest draft against the newest to-do list
    Apply {
        /// Project name
        project: String,
    },

    /// Distill staged output into project memory
    Remember {
        /// Project name
        project: String,
    },

    /// Extract sections from plain-text paper content
    Extract {
        /// Plain-text paper file
        file: PathBuf,

        /// Extract only this section
        #[arg(short, long)]
        section: Option<String>,

        /// Output directory for extracted sections
        #[arg(short, long, default_value = "extracted-sections")]
        out: PathBuf,

        /// Name for the paper subdirectory (default: file stem)
        #[arg(long)]
        paper_name: Option<String>,

        /// Disable AI-assisted extraction (rule-based only)
        #[arg(long)]
        no_ai: bool,
    },

    /// Generate a writing template from a reference section
    Template {
        /// Plain-text file with the reference section
        file: PathBuf,

        /// Section name given to the model for context
        #[arg(short, long, default_value = "Introduction")]
        section_name: String,

        /// Output template file (default: <file stem>_template.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a memory file and check its round-trip stability
    Validate {
        /// Memory file to validate
        file: PathBuf,
    },

    /// Show project status, or list projects
    Status {
        /// Project name; omit to list all projects
        project: Option<String>,
    },
}

/// CLI-facing provider selector
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ProviderArg {
    Gemini,
    Openai,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => ProviderKind::Gemini,
            ProviderArg::Openai => ProviderKind::OpenAi,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    let kind: ProviderKind = cli.provider.map(Into::into).unwrap_or(config.provider);

    match cli.command {
        Commands::Init { name, yes } => {
            execute_init(InitOptions { name, yes }, &config)?;
        }

        Commands::Write { project } => {
            execute_write(WriteOptions { project }, &config, kind)?;
        }

        Commands::Revise { project, diff } => {
            execute_revise(ReviseOptions { project, diff }, &config, kind)?;
        }

        Commands::Review { project } => {
            execute_review(ReviewOptions { project }, &config, kind)?;
        }

        Commands::Apply { project } => {
            execute_apply(ApplyOptions { project }, &config, kind)?;
        }

        Commands::Remember { project } => {
            execute_remember(RememberOptions { project }, &config, kind)?;
        }

        Commands::Extract {
            file,
            section,
            out,
            paper_name,
            no_ai,
        } => {
            let options = ExtractOptions {
                file,
                section,
                out,
                paper_name,
                no_ai,
            };
            execute_extract(options, &config, kind)?;
        }

        Commands::Template {
            file,
            section_name,
            output,
        } => {
            let options = TemplateOptions {
                file,
                section_name,
                output,
            };
            execute_template(options, &config, kind)?;
        }

        Commands::Validate { file } => {
            execute_validate(ValidateOptions { file })?;
        }

        Commands::Status { project } => {
            execute_status(StatusOptions { project }, &config)?;
        }
    }

    Ok(())
}
