//! APIHub CLI main entry point

use apihub_cli::{
    cli::{Cli, Commands},
    commands::ValidateCommand,
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose)?;

    // Disable colored output if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("APIHub CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Validate { args } => ValidateCommand::run(args, &cli.base_url).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apihub_cli::cli::Strictness;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["apihub", "validate", "api.yaml"]).unwrap();

        // base_url binds APIHUB_BASE_URL, so its parsed value depends on the
        // environment; no assertion on the default here.
        assert!(!cli.verbose);
        assert!(!cli.no_color);
        let Commands::Validate { args } = cli.command;
        assert_eq!(args.file, "api.yaml");
        assert_eq!(args.validation, Strictness::Basic);
        assert!(!args.import_external_references);
        assert!(!args.auto_create);
    }

    #[test]
    fn test_validate_command_parsing() {
        let cli = Cli::try_parse_from([
            "apihub",
            "validate",
            "api.yaml",
            "--doc",
            "my-docs",
            "--doc-name",
            "My Docs",
            "--hub",
            "my-hub",
            "--token",
            "SECRET",
            "--specification",
            "openapi/v3.1",
            "--validation",
            "strict",
            "--auto-create",
            "--import-external-references",
        ])
        .unwrap();

        let Commands::Validate { args } = cli.command;
        assert_eq!(args.doc, Some("my-docs".to_string()));
        assert_eq!(args.doc_name, Some("My Docs".to_string()));
        assert_eq!(args.hub, Some("my-hub".to_string()));
        assert_eq!(args.token, Some("SECRET".to_string()));
        assert_eq!(args.specification, Some("openapi/v3.1".to_string()));
        assert_eq!(args.validation, Strictness::Strict);
        assert!(args.auto_create);
        assert!(args.import_external_references);
    }

    #[test]
    fn test_base_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "apihub",
            "validate",
            "api.yaml",
            "--base-url",
            "https://staging.apihub.io/api/v1",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "https://staging.apihub.io/api/v1");
    }

    #[test]
    fn test_hidden_id_option_still_parses() {
        let cli =
            Cli::try_parse_from(["apihub", "validate", "api.yaml", "--id", "old-school-id"])
                .unwrap();

        let Commands::Validate { args } = cli.command;
        assert_eq!(args.id, Some("old-school-id".to_string()));
    }

    #[test]
    fn test_file_argument_is_required() {
        assert!(Cli::try_parse_from(["apihub", "validate"]).is_err());
    }
}
