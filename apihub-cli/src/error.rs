//! Error types for the CLI

use thiserror::Error;

use crate::client::ValidationIssue;
use crate::utils::truncate_text;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Definition error: {0}")]
    Core(#[from] apihub_core::CoreError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{}", render_issues(.issues))]
    InvalidDefinition { issues: Vec<ValidationIssue> },

    #[error("Unknown error: the server answered with HTTP {status}{}", render_body(.body))]
    Server { status: u16, body: String },

    #[error("General error: {0}")]
    General(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

fn render_issues(issues: &[ValidationIssue]) -> String {
    let mut out = String::from("Invalid request");
    for issue in issues {
        out.push_str("\n  ");
        out.push_str(&issue.location);
        out.push_str(": ");
        out.push_str(&issue.message);
    }
    out
}

fn render_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    format!("\n{}", truncate_text(body, 200))
}
