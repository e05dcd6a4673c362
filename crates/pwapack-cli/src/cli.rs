//! # CLI Structure and Argument Parsing
//!
//! Command-line interface for `pwapack`, built with `clap` derive macros.
//!
//! ```bash
//! # Generate a Chrome package into ./out/chrome
//! pwapack generate manifest.json --output out
//!
//! # Script-friendly outcome
//! pwapack generate manifest.json --output out --format json
//!
//! # List registered platforms
//! pwapack platforms
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level `pwapack` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "pwapack")]
#[command(version)]
#[command(about = "pwapack - Generate platform packages from web app manifests", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Show debug logging (same level as --verbose)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only show errors (wins over --verbose)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a config file (overrides PWAPACK_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the default icon and platform docs
    #[arg(long, global = true, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a platform package from a web app manifest
    Generate {
        /// Path to the W3C web app manifest (JSON)
        manifest: PathBuf,

        /// Root directory; the package is written to `<DIR>/<platform>`
        #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Target platform id
        #[arg(short = 'p', long, default_value = "chrome")]
        platform: String,

        /// Package identity (defaults to the manifest's short_name or name)
        #[arg(long)]
        package_name: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List available platforms
    Platforms {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Output format requested by the command.
    pub const fn format(&self) -> OutputFormat {
        match self {
            Self::Generate { format, .. } | Self::Platforms { format } => *format,
        }
    }
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// Single JSON object
    Json,
}
