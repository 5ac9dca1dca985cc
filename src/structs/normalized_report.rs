use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::structs::package_issue::PackageVulnerabilities;
use crate::structs::security_issue::SecurityIssue;

/// Fully-defaulted view of one backend payload: every field present, never
/// an absent value leaking into rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub repository_name: Option<String>,
    pub scan_date: Option<String>,
    pub issues: Vec<SecurityIssue>,
    pub packages: PackageVulnerabilities,
    /// Backend-defined malware records, passed through untouched.
    pub malware: Vec<Value>,
}

impl NormalizedReport {
    pub fn total_issues(&self) -> usize {
        self.issues.len()
    }

    pub fn count_by_severity(&self, severity: &str) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity_key() == severity)
            .count()
    }
}
