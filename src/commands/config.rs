use anyhow::{Context, Result};
use countdown_core::config::CountdownConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CountdownConfig) -> Result<()> {
    let config_path = CountdownConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Session:  {}", config.auth.session_path()?.display());
    println!();

    let mut shown = config.clone();
    if shown.auth.token.is_some() {
        shown.auth.token = Some("<redacted>".to_string());
    }

    println!("{}", "Settings".bold());
    let settings = toml::to_string_pretty(&shown).context("Failed to render settings")?;
    for line in settings.lines() {
        println!("  {line}");
    }

    Ok(())
}
