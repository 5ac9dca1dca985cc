use std::sync::Arc;
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use secureai_cli::config::constants::{
    SESSION_KEY_MALWARE, SESSION_KEY_PACKAGES, SESSION_KEY_REPOSITORY_URL,
    SESSION_KEY_SCAN_METADATA, SESSION_KEY_VULNERABILITIES,
};
use secureai_cli::enums::group_by::GroupBy;
use secureai_cli::errors::SecureAiResult;
use secureai_cli::services::grouping_engine::GroupingEngine;
use secureai_cli::services::issue_normalizer::IssueNormalizer;
use secureai_cli::services::report_exporter::ReportExporter;
use secureai_cli::services::scan_client::ScanBackend;
use secureai_cli::services::scan_orchestrator::{ScanOrchestrator, ScanOutcome};
use secureai_cli::services::session_store::SessionStateStore;
use secureai_cli::structs::config::scanner_config::ScannerConfig;
use secureai_cli::structs::package_issue::PackageVulnerabilities;
use secureai_cli::structs::scan_metadata::ScanMetadata;

struct FixedBackend {
    response: SecureAiResult<Value>,
}

#[async_trait]
impl ScanBackend for FixedBackend {
    async fn scan_repository(&self, _repository_url: &str) -> SecureAiResult<Value> {
        self.response.clone()
    }
}

fn scanner_config() -> ScannerConfig {
    ScannerConfig {
        tick_interval_ms: 5,
        soft_ceiling: 90.0,
        settle_delay_ms: 1,
    }
}

fn sample_payload() -> Value {
    json!({
        "repositoryName": "acme/app",
        "scanDate": "2026-08-25T09:30:00",
        "issues": [
            {
                "id": 1, "fileName": "app/api/generate.js", "lineNumber": 12,
                "issueType": "Hardcoded API Key", "severity": "high",
                "description": "API key is hardcoded in the source code.",
                "codeSnippet": "const key = \"sk-123\";",
                "suggestedFix": "const key = process.env.OPENAI_API_KEY;"
            },
            {
                "id": 2, "fileName": "Dockerfile", "lineNumber": 15,
                "issueType": "Insecure Docker Configuration", "severity": "Medium",
                "description": "Container runs as root.",
                "codeSnippet": "FROM node:18-alpine",
                "suggestedFix": "USER appuser"
            },
            {
                "id": 3, "fileName": "app/api/chat.js", "lineNumber": 28,
                "issueType": "Prompt Injection", "severity": "high",
                "description": "Unsanitized user input in prompt.",
                "codeSnippet": "const prompt = `${userQuestion}`;",
                "suggestedFix": "sanitize first"
            }
        ],
        "packagesVulnerabilities": {
            "node": {
                "frontend/package.json": [
                    { "name": "lodash", "severity": "critical", "isDirect": true,
                      "range": "<4.17.21", "fixAvailable": true }
                ]
            },
            "python": {
                "backend/requirements.txt": [
                    { "package_name": "flask", "analyzed_version": "0.12",
                      "vulnerabilities_found": 2 }
                ]
            }
        },
        "malware": [{ "path": "scripts/miner.sh" }]
    })
}

#[tokio::test(start_paused = true)]
async fn full_scan_flow_hands_results_between_steps() {
    let dir = TempDir::new().unwrap();
    let store = SessionStateStore::new(dir.path().join("session"));

    // Input step: the URL is handed to the scanning step via the store
    store
        .set(SESSION_KEY_REPOSITORY_URL, &"https://github.com/acme/app")
        .unwrap();

    let backend = Arc::new(FixedBackend {
        response: Ok(sample_payload()),
    });
    let mut orchestrator = ScanOrchestrator::new(store.clone(), backend, scanner_config());

    let outcome = orchestrator.run().await.unwrap();
    let ScanOutcome::Completed(session) = outcome else {
        panic!("expected completed scan");
    };
    assert_eq!(session.report.total_issues(), 3);

    // Results step reads everything back from the store, as a fresh
    // process would
    let metadata: ScanMetadata = store.get(SESSION_KEY_SCAN_METADATA).unwrap();
    assert_eq!(metadata.repository_url, "https://github.com/acme/app");

    let payload: Value = store.get(SESSION_KEY_VULNERABILITIES).unwrap();
    let report = IssueNormalizer::normalize(&payload);

    assert_eq!(report.repository_name.as_deref(), Some("acme/app"));
    assert_eq!(report.count_by_severity("high"), 2);
    assert_eq!(report.count_by_severity("medium"), 1);
    assert_eq!(report.malware.len(), 1);

    let packages: PackageVulnerabilities = store.get(SESSION_KEY_PACKAGES).unwrap();
    assert_eq!(packages.total_findings(), 2);
    let malware: Vec<Value> = store.get(SESSION_KEY_MALWARE).unwrap();
    assert_eq!(malware.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_scan_leaves_no_session_to_resume() {
    let dir = TempDir::new().unwrap();
    let store = SessionStateStore::new(dir.path().join("session"));
    store
        .set(SESSION_KEY_REPOSITORY_URL, &"https://github.com/acme/app")
        .unwrap();

    let backend = Arc::new(FixedBackend {
        response: Err(secureai_cli::errors::SecureAiError::network_error(
            "vulnerability scan",
            None,
            Some(500),
            "internal error",
        )),
    });
    let mut orchestrator = ScanOrchestrator::new(store.clone(), backend, scanner_config());

    let outcome = orchestrator.run().await.unwrap();
    assert!(matches!(outcome, ScanOutcome::Failed { .. }));

    // The results step treats the absent keys as "no prior scan"
    assert!(store.get::<ScanMetadata>(SESSION_KEY_SCAN_METADATA).is_none());
    assert!(store.get::<Value>(SESSION_KEY_VULNERABILITIES).is_none());
}

#[test]
fn normalize_group_export_pipeline_preserves_id_ordering() {
    let report = IssueNormalizer::normalize(&sample_payload());

    // Grouping by severity: both high issues first, insertion order kept
    let groups = GroupingEngine::group(&report.issues, GroupBy::Severity).unwrap();
    assert_eq!(groups[0].group_name, "high");
    assert_eq!(groups[0].issues.len(), 2);
    assert_eq!(groups[1].group_name, "medium");

    // Exporting the normalized set and re-parsing the summary lines
    // recovers the input id ordering
    let rendered = ReportExporter::render(&report.issues);
    let parsed_ids: Vec<u64> = rendered
        .lines()
        .skip(1)
        .filter(|line| line.contains(" | ") && !line.starts_with("ID "))
        .filter_map(|line| line.split(" | ").next())
        .filter_map(|id| id.parse().ok())
        .collect();
    let input_ids: Vec<u64> = report.issues.iter().map(|i| i.id).collect();

    assert_eq!(parsed_ids, input_ids);
}

#[test]
fn empty_scan_renders_zero_counts() {
    let report = IssueNormalizer::normalize(&json!({ "issues": [] }));

    assert_eq!(report.total_issues(), 0);
    assert_eq!(report.count_by_severity("high"), 0);
    assert_eq!(report.count_by_severity("medium"), 0);
    assert_eq!(report.count_by_severity("low"), 0);
    assert!(GroupingEngine::group(&report.issues, GroupBy::None).is_none());
    assert_eq!(
        ReportExporter::render(&report.issues),
        "ID | File | Issue Type | Severity | Line Number\n"
    );
}
