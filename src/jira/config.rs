//! Jira configuration
//!
//! Loads configuration from `~/.config/bugsmith/settings.toml`. Filing uses
//! API token auth: base URL, account email, token, and a project key, all
//! four required before any network attempt.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Jira configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL, e.g. https://example.atlassian.net
    pub base_url: Option<String>,
    /// Account email
    pub email: Option<String>,
    /// API token
    pub api_token: Option<String>,
    /// Project key issues are created under, e.g. QA
    pub project_key: Option<String>,
}

impl JiraConfig {
    /// Fully configured means all four fields are present and non-empty
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [
            &self.base_url,
            &self.email,
            &self.api_token,
            &self.project_key,
        ]
        .iter()
        .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Settings file structure
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    jira: Option<JiraConfig>,
}

/// Get path to config file
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("bugsmith").join("settings.toml"))
}

/// Load Jira config from settings file and environment
pub fn load_config() -> Result<JiraConfig> {
    let mut config = JiraConfig::default();

    if let Some(path) = config_path() {
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let settings: SettingsFile = toml::from_str(&contents)?;
            if let Some(jira) = settings.jira {
                config = jira;
            }
        }
    }

    // Override with environment variables
    if let Ok(url) = std::env::var("JIRA_BASE_URL") {
        config.base_url = Some(url);
    }
    if let Ok(email) = std::env::var("JIRA_EMAIL") {
        config.email = Some(email);
    }
    if let Ok(token) = std::env::var("JIRA_API_TOKEN") {
        config.api_token = Some(token);
    }
    if let Ok(key) = std::env::var("JIRA_PROJECT_KEY") {
        config.project_key = Some(key);
    }

    Ok(config)
}

/// Save Jira credentials to the config file
pub fn save_auth(base_url: &str, email: &str, api_token: &str, project_key: &str) -> Result<()> {
    let path = config_path().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;

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

    if !table.contains_key("jira") {
        table.insert("jira".to_string(), toml::Value::Table(toml::map::Map::new()));
    }

    let jira = table
        .get_mut("jira")
        .and_then(|v| v.as_table_mut())
        .ok_or_else(|| anyhow::anyhow!("jira section is not a table"))?;

    for (field, value) in [
        ("base_url", base_url),
        ("email", email),
        ("api_token", api_token),
        ("project_key", project_key),
    ] {
        jira.insert(field.to_string(), toml::Value::String(value.to_string()));
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

    fn full_config() -> JiraConfig {
        JiraConfig {
            base_url: Some("https://example.atlassian.net".to_string()),
            email: Some("qa@example.com".to_string()),
            api_token: Some("token".to_string()),
            project_key: Some("QA".to_string()),
        }
    }

    #[test]
    fn default_is_unconfigured() {
        assert!(!JiraConfig::default().is_configured());
    }

    #[test]
    fn all_four_fields_required() {
        assert!(full_config().is_configured());

        for strip in 0..4 {
            let mut config = full_config();
            match strip {
                0 => config.base_url = None,
                1 => config.email = None,
                2 => config.api_token = None,
                _ => config.project_key = None,
            }
            assert!(!config.is_configured(), "field {} missing", strip);
        }
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut config = full_config();
        config.project_key = Some("   ".to_string());
        assert!(!config.is_configured());
    }

    #[test]
    fn settings_file_parses_jira_section() {
        let settings: SettingsFile = toml::from_str(
            "[jira]\nbase_url = \"https://x.atlassian.net\"\nemail = \"e\"\napi_token = \"t\"\nproject_key = \"P\"\n",
        )
        .unwrap();
        assert!(settings.jira.unwrap().is_configured());
    }
}
