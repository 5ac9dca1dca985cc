use serde::{Deserialize, Serialize};
use crate::structs::normalized_report::NormalizedReport;
use crate::structs::scan_metadata::ScanMetadata;

/// The ephemeral state spanning one repository submission through to
/// displayed results. Single writer at a time: only the component active
/// in the current lifecycle step mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSession {
    pub metadata: ScanMetadata,
    pub report: NormalizedReport,
    pub scan_complete: bool,
}

impl ScanSession {
    pub fn new(metadata: ScanMetadata, report: NormalizedReport) -> Self {
        Self {
            metadata,
            report,
            scan_complete: true,
        }
    }
}
