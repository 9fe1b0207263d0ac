use crate::config::ApiConfig;
use crate::permissions::Principal;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::views::DocsService;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

/// Router Swagger - render Swagger 1.2 documentation from a router configuration
#[derive(Parser, Debug)]
#[command(name = "router-swagger")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the API configuration file (YAML or JSON)
    #[arg(value_name = "CONFIG")]
    pub config_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// API version to document; only the default API is supported
    #[arg(long = "api-version", value_name = "VERSION")]
    pub api_version: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the resource listing
    Resources {
        /// Absolute URI the listing is served at
        #[arg(long, default_value = "http://localhost:8000/api-docs/")]
        uri: String,
    },
    /// Print the API declaration of one resource, e.g. `accounts/profile`
    Resource {
        #[arg(value_name = "PATH")]
        path: String,
        /// Scheme and authority of the documented API
        #[arg(long, default_value = "http://localhost:8000")]
        host: String,
    },
    /// Print the UI client configuration
    Ui {
        /// Absolute URI the UI is served at
        #[arg(long, default_value = "http://localhost:8000/")]
        uri: String,
        /// Act as an authenticated user
        #[arg(long)]
        authenticated: bool,
        /// Act as a superuser
        #[arg(long)]
        superuser: bool,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.config_path.is_file() {
        anyhow::bail!(
            "Configuration file does not exist: {}",
            args.config_path.display()
        );
    }

    info!("Configuration: {}", args.config_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let config = ApiConfig::load(&args.config_path)
        .with_context(|| format!("Failed to load {}", args.config_path.display()))?;
    let service = DocsService::from_config(&config).context("Invalid router configuration")?;
    let version = args.api_version.as_deref();

    let content = match &args.command {
        Command::Resources { uri } => {
            info!("Rendering resource listing");
            let listing = service.resource_listing(uri, version)?;
            info!("Listed {} resources", listing.apis.len());
            render(&listing, args.output_format)?
        }
        Command::Resource { path, host } => {
            info!("Rendering API declaration for '{}'", path);
            let declaration = service.api_declaration(path, host, version)?;
            info!(
                "Documented {} APIs and {} models",
                declaration.apis.len(),
                declaration.models.len()
            );
            render(&declaration, args.output_format)?
        }
        Command::Ui {
            uri,
            authenticated,
            superuser,
        } => {
            let principal = Principal {
                is_authenticated: *authenticated || *superuser,
                is_superuser: *superuser,
            };
            let ui = service.ui_config(&principal, uri)?;
            render(&ui, args.output_format)?
        }
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn render<T: Serialize>(doc: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serialize_json(doc),
        OutputFormat::Yaml => serialize_yaml(doc),
    }
}
