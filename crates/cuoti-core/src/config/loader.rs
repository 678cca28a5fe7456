//! Config loader — reads `~/.cuoti/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.cuoti/config.json`
//! 3. `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`
//! 4. `CUOTI_AI__<FIELD>` (wins over everything)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value.
///
/// Supported overrides:
/// - `OPENAI_API_KEY`, `CUOTI_AI__API_KEY` → `ai.api_key`
/// - `OPENAI_BASE_URL`, `CUOTI_AI__BASE_URL` → `ai.base_url`
/// - `OPENAI_MODEL`, `CUOTI_AI__MODEL` → `ai.model`
/// - `CUOTI_AI__MAX_TOKENS` → `ai.max_tokens`
fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    for key in ["OPENAI_API_KEY", "CUOTI_AI__API_KEY"] {
        if let Some(val) = non_empty(key) {
            config.ai.api_key = val;
        }
    }
    for key in ["OPENAI_BASE_URL", "CUOTI_AI__BASE_URL"] {
        if let Some(val) = non_empty(key) {
            config.ai.base_url = Some(val);
        }
    }
    for key in ["OPENAI_MODEL", "CUOTI_AI__MODEL"] {
        if let Some(val) = non_empty(key) {
            config.ai.model = Some(val);
        }
    }
    if let Some(val) = non_empty("CUOTI_AI__MAX_TOKENS") {
        match val.parse::<u32>() {
            Ok(n) => config.ai.max_tokens = n,
            Err(_) => warn!("Ignoring invalid CUOTI_AI__MAX_TOKENS={}", val),
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
