use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity and timing of one scan session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub session_id: Uuid,
    pub repository_url: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanMetadata {
    pub fn new(repository_url: &str) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            repository_url: repository_url.to_string(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed_at = Some(Utc::now());
    }
}
