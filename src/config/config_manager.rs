use std::fs;
use std::path::PathBuf;
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{SecureAiError, SecureAiResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load() -> SecureAiResult<Config> {
        let Some(config_path) = Self::config_path() else {
            return Ok(Config::default());
        };

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(&config_path).map_err(|e| {
                SecureAiError::ConfigurationFileError {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn create_sample_config() -> SecureAiResult<PathBuf> {
        let sample_config = r#"# SecureAI scanner configuration

[backend]
# Base URL of the analysis backend
base_url = "http://localhost:8000"

# How long to wait for the backend before giving up (seconds)
request_timeout_secs = 300

[scanner]
# Progress ticker interval (milliseconds)
tick_interval_ms = 100

# Maximum progress the animation may reach before the backend responds
soft_ceiling = 90.0

# Pause after hitting 100% before showing results (milliseconds)
settle_delay_ms = 1000

[output]
# Default file name for exported reports
report_file = "security_issues_report.txt"
"#;

        let config_path = Self::config_path().ok_or_else(|| {
            SecureAiError::system_error("config init", "Could not determine home directory")
        })?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, sample_config)?;

        Ok(config_path)
    }

    pub fn validate_config(config: &Config) -> SecureAiResult<()> {
        if config.backend.base_url.trim().is_empty() {
            return Err(SecureAiError::config_error(
                "Backend base URL must not be empty",
                Some("backend.base_url"),
                Some("Set it to the analysis backend address, e.g. http://localhost:8000"),
            ));
        }

        if !config.backend.base_url.starts_with("http://") && !config.backend.base_url.starts_with("https://") {
            return Err(SecureAiError::config_error(
                "Backend base URL must start with http:// or https://",
                Some("backend.base_url"),
                None,
            ));
        }

        if config.scanner.tick_interval_ms == 0 {
            return Err(SecureAiError::config_error(
                "Tick interval must be greater than zero",
                Some("scanner.tick_interval_ms"),
                None,
            ));
        }

        if !(1.0..100.0).contains(&config.scanner.soft_ceiling) {
            return Err(SecureAiError::config_error(
                "Soft ceiling must be between 1 and 99 - the animation may never complete on its own",
                Some("scanner.soft_ceiling"),
                Some("90.0 is a sensible value"),
            ));
        }

        if config.output.report_file.trim().is_empty() {
            return Err(SecureAiError::config_error(
                "Report file name must not be empty",
                Some("output.report_file"),
                None,
            ));
        }

        Ok(())
    }
}
