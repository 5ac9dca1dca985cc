use serde::{Deserialize, Serialize};
use crate::structs::security_issue::SecurityIssue;

/// One bucket of issues produced by the grouping engine. Issues inside a
/// bucket keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueGroup {
    pub group_name: String,
    pub issues: Vec<SecurityIssue>,
}
