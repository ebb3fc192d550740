use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::generation::{GeminiClient, SlideSource};

/// Run one generation and write the slides as pretty JSON.
pub fn run(output: Option<&Path>, quiet: bool) -> Result<()> {
    let config = Config::load_or_default();
    let client = GeminiClient::from_config(&config)?;

    if !quiet {
        eprintln!(
            "{}",
            format!("Generating slides with {}...", client.model()).dimmed()
        );
    }

    let slides = client.generate().context("Generation failed")?;
    let json = serde_json::to_string_pretty(&slides)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!(
                    "{}",
                    format!("Wrote {} slides to {}", slides.len(), path.display()).green()
                );
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
