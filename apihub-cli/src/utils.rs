//! Utility functions for the CLI

use crate::error::CliResult;
use colored::{ColoredString, Colorize};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing with proper filtering.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        crate::error::CliError::General(format!("Failed to set tracing subscriber: {}", e))
    })?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    if max_len < 3 {
        // No room for an ellipsis, return a plain prefix.
        let mut cut = max_len;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        return text[..cut].to_string();
    }
    let mut cut = max_len - 3;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}

/// Validate file exists and is readable
pub fn validate_file_exists(path: &std::path::Path) -> CliResult<()> {
    if !path.exists() {
        return Err(crate::error::CliError::FileNotFound(
            path.display().to_string(),
        ));
    }
    Ok(())
}
