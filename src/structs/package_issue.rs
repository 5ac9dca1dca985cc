use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// npm-audit style dependency finding (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePackageIssue {
    pub name: String,
    pub severity: String,
    pub is_direct: bool,
    pub range: String,
    pub fix_available: bool,
}

/// safety-check style dependency finding (snake_case on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonPackageIssue {
    pub package_name: String,
    pub analyzed_version: String,
    pub vulnerabilities_found: u64,
}

/// Dependency findings bucketed per ecosystem, each bucket a mapping from
/// manifest file path to that ecosystem's issue shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVulnerabilities {
    #[serde(default)]
    pub node: BTreeMap<String, Vec<NodePackageIssue>>,
    #[serde(default)]
    pub python: BTreeMap<String, Vec<PythonPackageIssue>>,
}

impl PackageVulnerabilities {
    pub fn is_empty(&self) -> bool {
        self.node.is_empty() && self.python.is_empty()
    }

    pub fn total_findings(&self) -> usize {
        self.node.values().map(Vec::len).sum::<usize>()
            + self.python.values().map(Vec::len).sum::<usize>()
    }
}
