//! Gemini API configuration
//!
//! Loads configuration from `~/.config/bugsmith/settings.toml`

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    pub api_key: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Optional per-call timeout in seconds. Off by default: without it a
    /// hung upstream call hangs the batch, matching the documented behavior.
    pub request_timeout_secs: Option<u64>,
}

impl GeminiConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Model to use, falling back to the default
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// Settings file structure
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    gemini: Option<GeminiConfig>,
}

/// Get path to config file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("bugsmith").join("settings.toml"))
}

/// Load Gemini config from settings file and environment
pub fn load_config() -> Result<GeminiConfig> {
    let mut config = GeminiConfig::default();

    if let Some(path) = config_path() {
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let settings: SettingsFile = toml::from_str(&contents)?;
            if let Some(gemini) = settings.gemini {
                config = gemini;
            }
        }
    }

    // Override with environment variables
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        config.api_key = Some(key);
    }
    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        config.model = Some(model);
    }

    Ok(config)
}

/// Save the API key (and optionally the model) to the config file
pub fn save_auth(api_key: &str, model: Option<&str>) -> Result<()> {
    let path = config_path().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;

    // Read existing or create new
    let contents = if path.exists() {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };

    let mut doc: toml::Value =
        toml::from_str(&contents).unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a table"))?;

    if !table.contains_key("gemini") {
        table.insert(
            "gemini".to_string(),
            toml::Value::Table(toml::map::Map::new()),
        );
    }

    let gemini = table
        .get_mut("gemini")
        .and_then(|v| v.as_table_mut())
        .ok_or_else(|| anyhow::anyhow!("gemini section is not a table"))?;

    gemini.insert(
        "api_key".to_string(),
        toml::Value::String(api_key.to_string()),
    );
    if let Some(model) = model {
        gemini.insert("model".to_string(), toml::Value::String(model.to_string()));
    }

    let output = toml::to_string_pretty(&doc)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&path, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model(), DEFAULT_MODEL);
    }

    #[test]
    fn blank_key_is_unconfigured() {
        let config = GeminiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_with_key() {
        let config = GeminiConfig {
            api_key: Some("key".to_string()),
            model: Some("gemini-2.5-pro".to_string()),
            request_timeout_secs: None,
        };
        assert!(config.is_configured());
        assert_eq!(config.model(), "gemini-2.5-pro");
    }

    #[test]
    fn settings_file_parses_gemini_section() {
        let settings: SettingsFile = toml::from_str(
            "[gemini]\napi_key = \"k\"\nmodel = \"gemini-2.0-flash\"\nrequest_timeout_secs = 120\n",
        )
        .unwrap();
        let config = settings.gemini.unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.request_timeout_secs, Some(120));
    }

    #[test]
    fn settings_file_tolerates_other_sections() {
        let settings: SettingsFile = toml::from_str("[jira]\nbase_url = \"x\"\n").unwrap();
        assert!(settings.gemini.is_none());
    }
}
