use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::{
    GITHUB_URL_PATTERN, SESSION_KEY_REPOSITORY_URL, SESSION_KEY_SCAN_METADATA,
    SESSION_KEY_VULNERABILITIES,
};
use crate::enums::commands::Commands;
use crate::enums::group_by::GroupBy;
use crate::errors::{SecureAiError, SecureAiResult};
use crate::logger::results_printer::ResultsPrinter;
use crate::services::issue_normalizer::IssueNormalizer;
use crate::services::report_exporter::ReportExporter;
use crate::services::scan_client::HttpScanBackend;
use crate::services::scan_orchestrator::{ScanOrchestrator, ScanOutcome};
use crate::services::session_store::SessionStateStore;
use crate::structs::config::config::Config;
use crate::structs::scan_metadata::ScanMetadata;

static GITHUB_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(GITHUB_URL_PATTERN).expect("GitHub URL pattern is a valid regex")
});

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> SecureAiResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Scan { url } => self.scan_command(url).await,
            Commands::Results { group_by, expand, packages } => {
                self.results_command(group_by, expand, packages)
            }
            Commands::Report { output } => self.report_command(output),
            Commands::Clear => self.clear_command(),
            Commands::Validate => self.validate_command(),
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> SecureAiResult<()> {
        log::info!("🚀 Initializing secureai configuration...");

        let path = ConfigManager::create_sample_config()?;
        log::info!("✅ Configuration file created at: {}", path.display());
        log::info!("📝 Edit it to point at your analysis backend.");
        log::info!("🔧 Run 'secureai validate' to check your configuration.");

        Ok(())
    }

    async fn scan_command(&self, url: Option<String>) -> SecureAiResult<()> {
        let config = self.load_validated_config()?;

        let repository_url = match url {
            Some(url) => url,
            None => Self::prompt_for_repository_url()?,
        };
        Self::validate_repository_url(&repository_url)?;

        // Input step hands the URL to the scanning step through the store
        let store = SessionStateStore::open_default()?;
        store.set(SESSION_KEY_REPOSITORY_URL, &repository_url)?;

        let backend = Arc::new(HttpScanBackend::new(&config.backend)?);
        let mut orchestrator = ScanOrchestrator::new(store, backend, config.scanner.clone());

        match orchestrator.run().await? {
            ScanOutcome::Completed(session) => {
                log::info!("✅ Scan complete: {} issues found", session.report.total_issues());
                ResultsPrinter::print_results(
                    &session.metadata,
                    &session.report,
                    GroupBy::None,
                    false,
                    true,
                );
                log::info!("💡 Re-render with 'secureai results', export with 'secureai report'");
                Ok(())
            }
            ScanOutcome::MissingRepositoryUrl => {
                log::info!("💡 Enter a repository URL to start a scan.");
                Ok(())
            }
            ScanOutcome::Failed { repository_url, error, final_percent } => {
                log::error!("❌ Scan stalled at {}%: {}", final_percent, error);
                Err(SecureAiError::scan_error(
                    &repository_url,
                    "analysis request",
                    &error.user_message(),
                    true,
                ))
            }
            ScanOutcome::Cancelled => Ok(()),
        }
    }

    fn results_command(&self, group_by: GroupBy, expand: bool, packages: bool) -> SecureAiResult<()> {
        let store = SessionStateStore::open_default()?;

        let Some((metadata, payload)) = Self::load_session(&store) else {
            log::info!("💡 No scan session found. Run 'secureai scan' first.");
            return Ok(());
        };

        let report = IssueNormalizer::normalize(&payload);
        ResultsPrinter::print_results(&metadata, &report, group_by, expand, packages);

        Ok(())
    }

    fn report_command(&self, output: Option<PathBuf>) -> SecureAiResult<()> {
        let config = ConfigManager::load()?;
        let store = SessionStateStore::open_default()?;

        let Some((_metadata, payload)) = Self::load_session(&store) else {
            log::info!("💡 No scan session found. Run 'secureai scan' first.");
            return Ok(());
        };

        let report = IssueNormalizer::normalize(&payload);
        let path = output.unwrap_or_else(|| PathBuf::from(&config.output.report_file));
        let written = ReportExporter::export_to_file(&report.issues, &path)?;

        log::info!("💾 Report saved to: {}", written.display());
        Ok(())
    }

    fn clear_command(&self) -> SecureAiResult<()> {
        let store = SessionStateStore::open_default()?;
        store.clear()?;
        log::info!("🧹 Scan session cleared.");
        Ok(())
    }

    fn validate_command(&self) -> SecureAiResult<()> {
        log::info!("🔍 Validating secureai configuration...");

        let config = self.load_validated_config()?;
        log::info!("✅ Configuration is valid");
        log::info!("🌐 Backend: {}", config.backend.base_url);

        Ok(())
    }

    fn load_validated_config(&self) -> SecureAiResult<Config> {
        let config = match ConfigManager::load() {
            Ok(config) => config,
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'secureai init' to create a configuration file.");
                return Err(e);
            }
        };
        ConfigManager::validate_config(&config)?;
        Ok(config)
    }

    /// Both session keys must be present and readable, otherwise the step
    /// behaves as if no scan ever ran.
    fn load_session(store: &SessionStateStore) -> Option<(ScanMetadata, Value)> {
        let metadata: ScanMetadata = store.get(SESSION_KEY_SCAN_METADATA)?;
        let payload: Value = store.get(SESSION_KEY_VULNERABILITIES)?;
        Some((metadata, payload))
    }

    fn prompt_for_repository_url() -> SecureAiResult<String> {
        print!("🔗 GitHub repository URL: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(input.trim().to_string())
    }

    pub fn validate_repository_url(url: &str) -> SecureAiResult<()> {
        if url.is_empty() {
            return Err(SecureAiError::validation_error(
                "repository URL",
                url,
                "must not be empty",
                Some("Enter a GitHub repository URL, e.g. https://github.com/username/repo"),
            ));
        }

        if !GITHUB_URL_REGEX.is_match(url) {
            return Err(SecureAiError::validation_error(
                "repository URL",
                url,
                "must be a GitHub repository URL",
                Some("Expected format: https://github.com/username/repo"),
            ));
        }

        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_github_urls() {
        assert!(CommandRunner::validate_repository_url("https://github.com/acme/app").is_ok());
        assert!(CommandRunner::validate_repository_url("https://github.com/a-user/my-repo").is_ok());
    }

    #[test]
    fn rejects_empty_url() {
        let err = CommandRunner::validate_repository_url("").unwrap_err();
        assert!(matches!(err, SecureAiError::ValidationError { .. }));
    }

    #[test]
    fn rejects_non_github_urls() {
        for url in [
            "https://gitlab.com/acme/app",
            "http://github.com/acme/app",
            "github.com/acme/app",
            "not a url",
        ] {
            assert!(
                CommandRunner::validate_repository_url(url).is_err(),
                "should reject {}",
                url
            );
        }
    }
}
