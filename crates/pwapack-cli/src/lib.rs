//! pwapack CLI - generate platform packages from web app manifests.
//!
//! `main.rs` only builds the runtime; everything else lives here so the
//! command plumbing can be unit tested.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pwapack_core::Config;

pub mod cli;
mod commands;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::GenerateArgs;
use crate::utils::logging::{configure_colors, initialize_logging};

/// Execute the pwapack CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup, configuration loading or command
/// setup fails. A failed generation is reported and mapped to exit code 1.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;
    configure_colors(&cli);

    match cli.command.clone() {
        Commands::Generate {
            manifest,
            output,
            platform,
            package_name,
            format,
        } => {
            let config = load_config(&cli)?;
            let args = GenerateArgs {
                manifest,
                output,
                platform,
                package_name,
                format,
            };
            let succeeded = commands::generate::execute(&args, &config).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Commands::Platforms { format } => {
            commands::platforms::execute(format)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?.with_env_overrides()?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.assets_dir {
        config.assets.dir = Some(dir.clone());
    }
    Ok(config)
}
