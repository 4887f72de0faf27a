//! Definition validation command

use clap::Args;
use tracing::info;

use apihub_core::{Definition, Location};

use crate::cli::Strictness;
use crate::client::{ClientConfig, ValidationClient, ValidationOutcome, ValidationRequest};
use crate::error::{CliError, CliResult};
use crate::utils::{validate_file_exists, ColoredOutput};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path or URL of the API definition file
    #[arg(help = "Path or URL of the API definition file (YAML or JSON)")]
    pub file: String,

    /// Documentation the definition belongs to
    #[arg(long, help = "Documentation id (UUID) or slug")]
    pub doc: Option<String>,

    /// Name for a documentation created on the fly
    #[arg(long, help = "Documentation name, used together with --auto-create")]
    pub doc_name: Option<String>,

    /// Hub the documentation belongs to
    #[arg(long, help = "Hub id (UUID) or slug")]
    pub hub: Option<String>,

    /// API token
    #[arg(
        long,
        env = "APIHUB_TOKEN",
        hide_env_values = true,
        help = "Authentication token, sent as a Bearer token"
    )]
    pub token: Option<String>,

    /// Specification to validate against
    #[arg(long, help = "Specification hint (e.g. 'openapi/v3.1')")]
    pub specification: Option<String>,

    /// Validation level
    #[arg(long, value_enum, default_value = "basic", help = "Validation level")]
    pub validation: Strictness,

    /// Create the documentation when the slug does not exist yet
    #[arg(long, help = "Create the documentation when the slug does not exist yet")]
    pub auto_create: bool,

    /// Import external references into the definition before upload
    #[arg(
        long,
        help = "Resolve external $ref targets and inline them before upload"
    )]
    pub import_external_references: bool,

    /// Deprecated spelling of --doc
    #[arg(long, hide = true)]
    pub id: Option<String>,
}

pub struct ValidateCommand;

impl ValidateCommand {
    pub async fn run(args: ValidateArgs, base_url: &str) -> CliResult<()> {
        let source = Location::parse(&args.file)?;
        if let Some(path) = source.as_path() {
            validate_file_exists(path)?;
        }

        // --id predates --doc and skips the UUID/slug split: legacy values
        // always travel as ids.
        let legacy_id = if args.doc.is_none() { args.id } else { None };
        if legacy_id.is_some() {
            println!(
                "{} the --id option is deprecated, use --doc instead",
                ColoredOutput::warning("[DEPRECATION WARNING]")
            );
        }

        info!("Validating {}", source);

        let definition = Definition::new(source, args.import_external_references);
        let content = definition.prepare().await?;

        let client = ValidationClient::new(ClientConfig::new(base_url).with_token(args.token))?;
        let mut request = ValidationRequest::new(
            args.doc,
            args.doc_name,
            args.hub,
            content,
            args.specification,
            args.validation.as_str().to_string(),
            args.auto_create,
        );
        if let Some(id) = legacy_id {
            request = request.with_documentation_id(id);
        }

        match client.validate(&request).await? {
            ValidationOutcome::Valid => {
                println!("{}", ColoredOutput::success("✓ Definition is valid"));
                Ok(())
            }
            ValidationOutcome::Invalid(issues) => Err(CliError::InvalidDefinition { issues }),
            ValidationOutcome::ServerError { status, body } => {
                Err(CliError::Server { status, body })
            }
        }
    }
}
