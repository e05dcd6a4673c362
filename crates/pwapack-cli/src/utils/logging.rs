//! Logging and color setup for the CLI.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, OutputFormat};

/// Pick the log level from the global flags.
///
/// JSON output keeps stderr quiet so stdout stays machine-readable.
pub fn log_level(cli: &Cli) -> Level {
    if cli.quiet || cli.command.format() == OutputFormat::Json {
        Level::ERROR
    } else if cli.verbose || cli.debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(color_enabled(cli))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Honor `--no-color` and `NO_COLOR`.
pub fn configure_colors(cli: &Cli) {
    if !color_enabled(cli) {
        colored::control::set_override(false);
    }
}

fn color_enabled(cli: &Cli) -> bool {
    !cli.no_color && std::env::var_os("NO_COLOR").is_none()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(log_level(&parse(&["pwapack", "platforms"])), Level::WARN);
    }

    #[test]
    fn test_verbose_and_debug_raise_level() {
        assert_eq!(
            log_level(&parse(&["pwapack", "-v", "generate", "m.json"])),
            Level::DEBUG
        );
        assert_eq!(
            log_level(&parse(&["pwapack", "--debug", "platforms"])),
            Level::DEBUG
        );
    }

    #[test]
    fn test_json_output_silences_logs() {
        assert_eq!(
            log_level(&parse(&["pwapack", "-v", "generate", "m.json", "--format", "json"])),
            Level::ERROR
        );
        assert_eq!(log_level(&parse(&["pwapack", "-q", "platforms"])), Level::ERROR);
    }
}
