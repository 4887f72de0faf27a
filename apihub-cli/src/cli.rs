//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apihub",
    about = "APIHub - Validate API definitions before publishing",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the APIHub API
    #[arg(
        long,
        global = true,
        env = "APIHUB_BASE_URL",
        default_value = "https://apihub.io/api/v1",
        help = "Base URL of the APIHub API"
    )]
    pub base_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an API definition against the APIHub servers
    Validate {
        #[command(flatten)]
        args: crate::commands::ValidateArgs,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Strictness {
    /// Structural validation only
    Basic,
    /// Structural validation plus style and completeness checks
    Strict,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Basic => "basic",
            Strictness::Strict => "strict",
        }
    }
}
