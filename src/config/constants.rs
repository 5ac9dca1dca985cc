pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const VULNERABILITIES_ENDPOINT: &str = "vulnerabilities";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_SOFT_CEILING: f64 = 90.0;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

pub const CONFIG_DIR_NAME: &str = "secureai";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_DIR_NAME: &str = "session";

// Session store keys (string-keyed, JSON-valued)
pub const SESSION_KEY_REPOSITORY_URL: &str = "repositoryUrl";
pub const SESSION_KEY_VULNERABILITIES: &str = "vulnerabilities";
pub const SESSION_KEY_PACKAGES: &str = "packagesVulnerabilities";
pub const SESSION_KEY_MALWARE: &str = "malware";
pub const SESSION_KEY_SCAN_METADATA: &str = "scanMetadata";

pub const DEFAULT_REPORT_FILE_NAME: &str = "security_issues_report.txt";

pub const GITHUB_URL_PATTERN: &str = r"^https://github\.com/[\w-]+/[\w-]+";

/// Phase labels shown next to the progress bar, advanced as a function of
/// progress (one label per 10%).
pub const SCAN_STEPS: &[&str] = &[
    "Cloning repository...",
    "Analyzing project structure...",
    "Scanning for hardcoded API keys...",
    "Checking Docker configurations...",
    "Identifying prompt injection vulnerabilities...",
    "Examining API endpoints for security issues...",
    "Validating input sanitization...",
    "Checking for rate limiting implementations...",
    "Analyzing authentication mechanisms...",
    "Generating security report...",
];
