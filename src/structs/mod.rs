pub mod cli;
pub mod config;
pub mod issue_group;
pub mod normalized_report;
pub mod package_issue;
pub mod scan_metadata;
pub mod scan_session;
pub mod security_issue;
