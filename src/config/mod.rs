mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./instalearn.toml",
        "./config.toml",
        "~/.config/instalearn/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("No config file found, using defaults");
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.playback.tick_interval_ms == 0 {
        anyhow::bail!("Playback tick interval cannot be 0");
    }

    let url = reqwest::Url::parse(&config.quiz.api_url)
        .with_context(|| format!("Invalid quiz API URL: {}", config.quiz.api_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Quiz API URL must be http or https: {}", config.quiz.api_url);
    }

    if config.quiz.timeout_secs == 0 {
        anyhow::bail!("Quiz request timeout cannot be 0");
    }

    if config.quiz.question_count == 0 {
        anyhow::bail!("Quiz question count cannot be 0");
    }

    Ok(())
}
