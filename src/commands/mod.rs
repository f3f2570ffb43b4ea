//! CLI command implementations.
//!
//! Each command lives in its own submodule with an options struct and an
//! `execute_*` entry point.

pub mod apply;
pub mod extract;
pub mod init;
pub mod remember;
pub mod review;
pub mod revise;
pub mod status;
pub mod template;
pub mod validate;
pub mod write;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use apply::{execute_apply, ApplyOptions};
pub use extract::{execute_extract, ExtractOptions};
pub use init::{execute_init, InitOptions};
pub use remember::{execute_remember, RememberOptions};
pub use review::{execute_review, ReviewOptions};
pub use revise::{execute_revise, ReviseOptions};
pub use status::{execute_status, StatusOptions};
pub use template::{execute_template, TemplateOptions};
pub use validate::{execute_validate, ValidateOptions};
pub use write::{execute_write, WriteOptions};

/// Spinner shown while a blocking provider call is in flight.
pub(crate) fn provider_spinner(provider: &str, doing: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message(format!("{doing} ({provider})..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Shorten text to a one-line preview.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(max_chars).collect();
    if line.chars().count() > max_chars || text.lines().count() > 1 {
        out.push_str("...");
    }
    out
}
