use std::collections::BTreeMap;
use serde_json::Value;
use crate::structs::normalized_report::NormalizedReport;
use crate::structs::package_issue::{NodePackageIssue, PackageVulnerabilities, PythonPackageIssue};
use crate::structs::security_issue::SecurityIssue;

const UNKNOWN_TEXT: &str = "Unknown";
const UNKNOWN_SEVERITY: &str = "unknown";

/// Converts an arbitrary backend payload into canonical issue records.
///
/// Every missing or malformed nested field resolves to a documented
/// default; only the surrounding layers treat anything as an error
/// (unparseable top-level JSON, missing `issues` on the wire). Output
/// never contains an absent value.
pub struct IssueNormalizer;

impl IssueNormalizer {
    pub fn normalize(payload: &Value) -> NormalizedReport {
        let issues = payload
            .get("issues")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| Self::normalize_issue(index, entry))
                    .collect()
            })
            .unwrap_or_default();

        NormalizedReport {
            repository_name: string_field(payload, "repositoryName"),
            scan_date: string_field(payload, "scanDate"),
            issues,
            packages: Self::normalize_packages(payload.get("packagesVulnerabilities")),
            malware: Self::normalize_malware(payload.get("malware")),
        }
    }

    fn normalize_issue(index: usize, entry: &Value) -> SecurityIssue {
        SecurityIssue {
            // Positional fallback keeps ids unique within the scan when the
            // backend omits them.
            id: u64_field(entry, "id").unwrap_or(index as u64 + 1),
            file_name: string_field(entry, "fileName").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            line_number: u64_field(entry, "lineNumber").unwrap_or(0),
            issue_type: string_field(entry, "issueType").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            severity: string_field(entry, "severity").unwrap_or_else(|| UNKNOWN_SEVERITY.to_string()),
            description: string_field(entry, "description").unwrap_or_default(),
            code_snippet: string_field(entry, "codeSnippet").unwrap_or_default(),
            suggested_fix: string_field(entry, "suggestedFix").unwrap_or_default(),
        }
    }

    fn normalize_packages(packages: Option<&Value>) -> PackageVulnerabilities {
        let Some(packages) = packages else {
            return PackageVulnerabilities::default();
        };

        PackageVulnerabilities {
            node: Self::normalize_ecosystem(packages.get("node"), Self::normalize_node_issue),
            python: Self::normalize_ecosystem(packages.get("python"), Self::normalize_python_issue),
        }
    }

    fn normalize_ecosystem<T>(
        bucket: Option<&Value>,
        normalize_entry: fn(&Value) -> T,
    ) -> BTreeMap<String, Vec<T>> {
        let mut normalized = BTreeMap::new();

        let Some(entries) = bucket.and_then(Value::as_object) else {
            return normalized;
        };

        for (file_path, issues) in entries {
            let issues = issues
                .as_array()
                .map(|list| list.iter().map(normalize_entry).collect())
                .unwrap_or_default();
            normalized.insert(file_path.clone(), issues);
        }

        normalized
    }

    fn normalize_node_issue(entry: &Value) -> NodePackageIssue {
        NodePackageIssue {
            name: string_field(entry, "name").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            severity: string_field(entry, "severity").unwrap_or_else(|| UNKNOWN_SEVERITY.to_string()),
            is_direct: entry.get("isDirect").and_then(Value::as_bool).unwrap_or(false),
            range: string_field(entry, "range").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            fix_available: entry.get("fixAvailable").and_then(Value::as_bool).unwrap_or(false),
        }
    }

    fn normalize_python_issue(entry: &Value) -> PythonPackageIssue {
        PythonPackageIssue {
            package_name: string_field(entry, "package_name").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            analyzed_version: string_field(entry, "analyzed_version").unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
            vulnerabilities_found: u64_field(entry, "vulnerabilities_found").unwrap_or(0),
        }
    }

    fn normalize_malware(malware: Option<&Value>) -> Vec<Value> {
        malware
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(|s| s.to_string())
}

fn u64_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}
