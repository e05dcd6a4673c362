//! pwapack CLI entry point.

use std::process::ExitCode;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    pwapack_cli::run().await
}
