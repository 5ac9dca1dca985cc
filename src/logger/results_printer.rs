use terminal_size::{terminal_size, Width};
use crate::enums::group_by::GroupBy;
use crate::enums::severity::Severity;
use crate::services::grouping_engine::GroupingEngine;
use crate::structs::normalized_report::NormalizedReport;
use crate::structs::scan_metadata::ScanMetadata;
use crate::structs::security_issue::SecurityIssue;

/// Renders the results step in the terminal: summary counts, the
/// security-issues table (flat or grouped), and optionally the
/// dependency-package and malware tables.
pub struct ResultsPrinter;

impl ResultsPrinter {
    fn rule_width() -> usize {
        match terminal_size() {
            Some((Width(w), _)) => (w as usize).min(100),
            None => 80,
        }
    }

    fn rule() -> String {
        "━".repeat(Self::rule_width())
    }

    pub fn print_results(
        metadata: &ScanMetadata,
        report: &NormalizedReport,
        group_by: GroupBy,
        expand: bool,
        include_packages: bool,
    ) {
        println!("\n{}", Self::rule());
        println!("🛡️  Security Scan Results");
        println!("{}", Self::rule());
        println!("📦 Repository: {}", metadata.repository_url);
        if let Some(name) = &report.repository_name {
            println!("🏷️  Name: {}", name);
        }
        if let Some(completed) = &metadata.completed_at {
            println!("🕑 Scanned: {}", completed.format("%Y-%m-%d %H:%M:%S UTC"));
        }

        Self::print_summary(report);
        Self::print_issues(&report.issues, group_by, expand);

        if include_packages {
            Self::print_packages(report);
            Self::print_malware(report);
        }
    }

    fn print_summary(report: &NormalizedReport) {
        println!("\n📊 Summary");
        println!("   Total Issues: {}", report.total_issues());
        println!("   🔴 High:   {}", report.count_by_severity("high"));
        println!("   🟡 Medium: {}", report.count_by_severity("medium"));
        println!("   🔵 Low:    {}", report.count_by_severity("low"));
    }

    fn print_issues(issues: &[SecurityIssue], group_by: GroupBy, expand: bool) {
        println!("\n🔍 Security Issues");

        if issues.is_empty() {
            println!("   ✅ No security issues found");
            return;
        }

        match GroupingEngine::group(issues, group_by) {
            None => {
                // Flat single-tab view gets the severity pre-sort
                let mut sorted = issues.to_vec();
                GroupingEngine::sort_by_severity(&mut sorted);
                for issue in &sorted {
                    Self::print_issue(issue, expand);
                }
            }
            Some(groups) => {
                for group in &groups {
                    let count = group.issues.len();
                    println!(
                        "\n   📂 {} ({} issue{})",
                        group.group_name,
                        count,
                        if count == 1 { "" } else { "s" }
                    );
                    for issue in &group.issues {
                        Self::print_issue(issue, expand);
                    }
                }
            }
        }
    }

    fn print_issue(issue: &SecurityIssue, expand: bool) {
        let severity = Severity::parse(&issue.severity);
        println!(
            "   {} [{}] {}:{} - {}",
            severity.emoji(),
            issue.severity,
            issue.file_name,
            issue.line_number,
            issue.issue_type
        );

        if expand {
            if !issue.description.is_empty() {
                println!("      {}", issue.description);
            }
            if !issue.code_snippet.is_empty() {
                println!("      Vulnerable code:");
                for line in issue.code_snippet.lines() {
                    println!("      \x1b[31m│ {}\x1b[0m", line);
                }
            }
            if !issue.suggested_fix.is_empty() {
                println!("      Suggested fix:");
                for line in issue.suggested_fix.lines() {
                    println!("      \x1b[32m│ {}\x1b[0m", line);
                }
            }
            println!();
        }
    }

    fn print_packages(report: &NormalizedReport) {
        println!("\n📦 Package Vulnerabilities");

        if report.packages.node.is_empty() {
            println!("\n   Node.js: no package vulnerabilities found");
        } else {
            println!("\n   Node.js Packages");
            for (file_path, issues) in &report.packages.node {
                println!("   📄 {}", file_path);
                for issue in issues {
                    let severity = Severity::parse(&issue.severity);
                    println!(
                        "      {} {} [{}] {} - {} - fix available: {}",
                        severity.emoji(),
                        issue.name,
                        issue.severity,
                        if issue.is_direct { "direct" } else { "indirect" },
                        issue.range,
                        if issue.fix_available { "yes" } else { "no" }
                    );
                }
            }
        }

        if report.packages.python.is_empty() {
            println!("\n   Python: no package vulnerabilities found");
        } else {
            println!("\n   Python Packages");
            for (file_path, issues) in &report.packages.python {
                println!("   📄 {}", file_path);
                for issue in issues {
                    println!(
                        "      {} {} {} - {} known vulnerabilit{}",
                        Self::count_badge(issue.vulnerabilities_found),
                        issue.package_name,
                        issue.analyzed_version,
                        issue.vulnerabilities_found,
                        if issue.vulnerabilities_found == 1 { "y" } else { "ies" }
                    );
                }
            }
        }
    }

    fn count_badge(count: u64) -> &'static str {
        match count {
            0 => "🟢",
            1 => "🔵",
            2 => "🟡",
            _ => "🔴",
        }
    }

    fn print_malware(report: &NormalizedReport) {
        println!("\n☣️  Malware Findings");

        if report.malware.is_empty() {
            println!("   ✅ No malware detected");
            return;
        }

        for finding in &report.malware {
            match serde_json::to_string(finding) {
                Ok(rendered) => println!("   ⚠️ {}", rendered),
                Err(_) => println!("   ⚠️ <unrenderable finding>"),
            }
        }
    }
}
