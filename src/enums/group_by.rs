use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Grouping dimension for the security-issues table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    None,
    Severity,
    File,
}

impl Default for GroupBy {
    fn default() -> Self {
        GroupBy::None
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Severity => "severity",
            Self::File => "file",
        };
        write!(f, "{}", name)
    }
}
