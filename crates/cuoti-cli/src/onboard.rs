//! `cuoti onboard` — initialize `~/.cuoti/config.json`.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use cuoti_core::config::{get_config_path, save_config, Config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "📒 Cuoti — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Add your apiKey, then run `cuoti analyze <IMAGE>`.".green()
    );
    println!();

    Ok(())
}

/// Write a default config unless one exists. Returns whether a file was created.
///
/// Env overrides are not applied, so secrets from the environment stay off disk.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
