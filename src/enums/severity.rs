use serde::{Deserialize, Serialize};

/// Closed severity label set used for ranking and display.
///
/// Backend labels are compared case-insensitively; anything outside the
/// known set maps to `Unknown`, which always sorts last. `moderate` is the
/// npm-audit spelling of `medium` and ranks with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "critical")]
    Critical,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Severity {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" | "moderate" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }

    /// Fixed sort rank: critical=1, high=2, medium=3, low=4, unknown last.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
            Self::Unknown => 5,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Critical => "🛑",
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🔵",
            Self::Unknown => "⚪",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Unknown
    }
}
