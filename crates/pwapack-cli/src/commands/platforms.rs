//! `pwapack platforms`

use anyhow::Result;
use colored::Colorize;
use pwapack_core::platform::PLATFORMS;
use serde::Serialize;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct PlatformEntry {
    id: &'static str,
    name: &'static str,
}

pub fn execute(format: OutputFormat) -> Result<()> {
    let entries: Vec<PlatformEntry> = PLATFORMS
        .iter()
        .map(|&(id, name)| PlatformEntry { id, name })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for entry in &entries {
                println!("{:<10} {}", entry.id.bold(), entry.name);
            }
        },
    }
    Ok(())
}
