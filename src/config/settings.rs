use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;

/// Upper bound for `request_timeout_secs`
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Application settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// URL of the quotes collection
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:5000/quotes".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates settings
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid api_url '{}'", self.api_url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            bail!(
                "Invalid api_url '{}': scheme must be http or https",
                self.api_url
            );
        }

        if url.cannot_be_a_base() || url.host_str().is_none() {
            bail!("Invalid api_url '{}': missing host", self.api_url);
        }

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            bail!(
                "request_timeout_secs must be at most {} (got {})",
                MAX_REQUEST_TIMEOUT_SECS,
                self.request_timeout_secs
            );
        }

        Ok(())
    }
}

/// Manages the settings file and log directory under ~/.quotedeck/
pub struct SettingsManager {
    config_dir: PathBuf,
}

impl SettingsManager {
    /// Creates a SettingsManager using the default config directory (~/.quotedeck/)
    pub fn new() -> Result<Self> {
        let config_dir = dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".quotedeck");

        Ok(Self { config_dir })
    }

    /// Creates a SettingsManager with a custom config directory (for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Returns the directory log files are written to
    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Loads settings, falling back to defaults when no file exists
    pub fn load(&self) -> Result<Settings> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }
        load_settings_file(&path)
    }
}

/// Reads settings from an explicit path. The file must exist.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let file =
        File::open(path).with_context(|| format!("Failed to open settings file: {:?}", path))?;

    let mut reader = BufReader::new(file);
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_manager() -> (SettingsManager, TempDir) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let manager = SettingsManager::with_config_dir(temp.path().to_path_buf());
        (manager, temp)
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.api_url, "http://localhost:5000/quotes");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_gives_defaults() {
        let (manager, _temp) = create_test_manager();
        assert_eq!(manager.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_load_full_file() {
        let (manager, temp) = create_test_manager();
        fs::write(
            temp.path().join("config.toml"),
            "api_url = \"https://quotes.example.com/api/quotes\"\n\
             request_timeout_secs = 5\n\
             log_level = \"debug\"\n",
        )
        .unwrap();

        let settings = manager.load().unwrap();
        assert_eq!(
            settings,
            Settings {
                api_url: "https://quotes.example.com/api/quotes".to_string(),
                request_timeout_secs: 5,
                log_level: "debug".to_string(),
            }
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let (manager, temp) = create_test_manager();
        fs::write(
            temp.path().join("config.toml"),
            "api_url = \"http://10.0.0.2:8080/quotes\"\n",
        )
        .unwrap();

        let settings = manager.load().unwrap();
        assert_eq!(settings.api_url, "http://10.0.0.2:8080/quotes");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let (manager, temp) = create_test_manager();
        fs::write(temp.path().join("config.toml"), "api_url = [").unwrap();

        assert!(manager.load().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();

        settings.api_url = "ftp://example.com/quotes".to_string();
        assert!(settings.validate().is_err());

        settings.api_url = "not a url".to_string();
        assert!(settings.validate().is_err());

        settings.api_url = default_api_url();
        settings.request_timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_caps_timeout() {
        let mut settings = Settings {
            request_timeout_secs: MAX_REQUEST_TIMEOUT_SECS,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());

        settings.request_timeout_secs = MAX_REQUEST_TIMEOUT_SECS + 1;
        assert!(settings.validate().is_err());

        settings.request_timeout_secs = u64::MAX;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("at most 3600"));
    }
}
