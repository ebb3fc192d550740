use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{self, Config};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init => init(),
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn init() -> Result<()> {
    let mut config = Config::load_or_default();

    let api_key = inquire::Password::new("Gemini API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://aistudio.google.com/apikey")
        .prompt()?;
    config.set("gemini.api_key", &api_key)?;

    let model = inquire::Text::new("Model:")
        .with_default(config.model())
        .prompt()?;
    config.set("gemini.model", &model)?;

    let path = config.save()?;
    println!(
        "{}",
        format!("Configuration saved to {}", path.display()).green()
    );
    Ok(())
}

fn show() -> Result<()> {
    let config = Config::load_or_default();
    let path = Config::path()?;

    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let key = match config.resolve_api_key() {
        Some(key) => config::mask_secret(&key),
        None => "(not set)".yellow().to_string(),
    };
    println!("{}", "gemini".bold());
    println!("  api_key:  {key}");
    println!("  model:    {}", config.model());
    println!("  endpoint: {}", config.endpoint());
    println!("{}", "images".bold());
    println!("  host:     {}", config.image_host());
    println!("{}", "defaults".bold());
    println!("  windowed: {}", config.windowed());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{}",
        format!("Set {key} in {}", path.display()).green()
    );
    Ok(())
}
