use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::{SecureAiError, SecureAiResult};
use crate::structs::security_issue::SecurityIssue;

const REPORT_HEADER: &str = "ID | File | Issue Type | Severity | Line Number";
const RULE_LINE: &str = "--------------------------------------------------------------------------------";

/// Serializes the issue set into a flat, human-readable text report.
///
/// Known limitation: fields are written verbatim, so a pipe character or
/// newline inside a field will corrupt the tabular summary lines.
pub struct ReportExporter;

impl ReportExporter {
    pub fn render(issues: &[SecurityIssue]) -> String {
        let mut report = String::new();
        report.push_str(REPORT_HEADER);
        report.push('\n');

        for issue in issues {
            report.push_str(RULE_LINE);
            report.push('\n');
            report.push_str(&format!(
                "{} | {} | {} | {} | {}\n",
                issue.id, issue.file_name, issue.issue_type, issue.severity, issue.line_number
            ));
            report.push('\n');
            report.push_str("Description:\n");
            report.push_str(&issue.description);
            report.push('\n');
            report.push('\n');
            report.push_str("Code Snippet:\n");
            report.push_str(&issue.code_snippet);
            report.push('\n');
            report.push('\n');
            report.push_str("Suggested Fix:\n");
            report.push_str(&issue.suggested_fix);
            report.push('\n');
        }

        if !issues.is_empty() {
            report.push_str(RULE_LINE);
            report.push('\n');
        }

        report
    }

    pub fn export_to_file(issues: &[SecurityIssue], path: &Path) -> SecureAiResult<PathBuf> {
        let report = Self::render(issues);

        fs::write(path, report).map_err(|e| {
            SecureAiError::system_error(
                "report export",
                &format!("Failed to write '{}': {}", path.display(), e),
            )
        })?;

        Ok(path.to_path_buf())
    }
}
