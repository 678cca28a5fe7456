//! `cuoti status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use cuoti_core::config::{get_config_path, load_config, AiConfig};
use cuoti_providers::DEFAULT_API_BASE;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "📒 Cuoti Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!("  {:<18} {}", "Model:".bold(), config.ai.model());
    println!(
        "  {:<18} {}",
        "Base URL:".bold(),
        config.ai.base_url.as_deref().unwrap_or(DEFAULT_API_BASE)
    );
    println!(
        "  {:<18} {}",
        "Max tokens:".bold(),
        format!("{}", config.ai.max_tokens).dimmed()
    );
    println!("  {:<18} {}", "API key:".bold(), key_status(&config.ai));

    println!();

    Ok(())
}

fn key_status(ai: &AiConfig) -> String {
    if ai.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}
