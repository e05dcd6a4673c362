//! `pwapack generate`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use pwapack_core::platform::create_platform;
use pwapack_core::{Config, GenerationOptions, GenerationOutcome, PipelineError, SourceManifest};
use tracing::debug;

use crate::cli::OutputFormat;

/// Arguments for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub manifest: PathBuf,
    pub output: PathBuf,
    pub platform: String,
    pub package_name: Option<String>,
    pub format: OutputFormat,
}

/// Run the pipeline and print the outcome.
///
/// Returns `Ok(false)` when the pipeline itself failed; the error has
/// already been reported. Setup problems (unreadable manifest, unknown
/// platform) are returned as errors.
pub async fn execute(args: &GenerateArgs, config: &Config) -> Result<bool> {
    let source = SourceManifest::from_path(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;
    let platform = create_platform(&args.platform, config)?;

    let options = args
        .package_name
        .as_deref()
        .map_or_else(|| GenerationOptions::for_manifest(&source), GenerationOptions::new);
    debug!(
        platform = platform.id(),
        package = %options.package_name,
        output = %args.output.display(),
        "starting generation"
    );

    match platform.create(&source, &args.output, &options).await {
        Ok(outcome) => {
            print_outcome(&outcome, args.format)?;
            Ok(true)
        },
        Err(err) => {
            print_failure(&err, args.format)?;
            Ok(false)
        },
    }
}

fn print_outcome(outcome: &GenerationOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        },
        OutputFormat::Text => {
            println!(
                "{}",
                format!("The {} app was created successfully!", outcome.platform_name).green()
            );
            for warning in &outcome.warnings {
                println!(
                    "  {} icon {} ({}): {}",
                    "skipped".yellow(),
                    warning.size,
                    warning.url,
                    warning.reason
                );
            }
            println!("  {}", display_dir(&outcome.package_dir).dimmed());
        },
    }
    Ok(())
}

fn print_failure(err: &PipelineError, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "error": err.to_string(),
                "platform": err.platform(),
                "stage": err.stage(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        },
        OutputFormat::Text => {
            eprintln!("{}", err.to_string().red());
        },
    }
    Ok(())
}

fn display_dir(path: &Path) -> String {
    format!("Package: {}", path.display())
}
