use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

/// Canonical code-level security finding, fully defaulted by the
/// normalizer. Immutable once produced; `id` is unique within one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    pub id: u64,
    pub file_name: String,
    pub line_number: u64,
    pub issue_type: String,
    /// Original backend casing, kept for display.
    pub severity: String,
    pub description: String,
    pub code_snippet: String,
    pub suggested_fix: String,
}

impl SecurityIssue {
    /// Canonical lowercase severity key used for grouping and counting.
    pub fn severity_key(&self) -> String {
        self.severity.trim().to_lowercase()
    }

    pub fn severity_rank(&self) -> u8 {
        Severity::parse(&self.severity).rank()
    }
}
