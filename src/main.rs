//! Router Swagger - command-line tool for rendering Swagger 1.2 documentation.
//!
//! Loads an API configuration file describing routers, handler types and models, and prints
//! one of the documentation documents the UI consumes.
//!
//! # Usage
//!
//! ```bash
//! router-swagger [OPTIONS] <CONFIG> <COMMAND>
//! ```
//!
//! # Examples
//!
//! Print the resource listing:
//! ```bash
//! router-swagger api.yaml resources
//! ```
//!
//! Write the declaration of a nested resource as YAML:
//! ```bash
//! router-swagger api.yaml -f yaml -o profile.yaml resource accounts/profile
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use router_swagger::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Router Swagger starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    Ok(())
}
