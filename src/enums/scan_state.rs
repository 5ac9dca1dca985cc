use serde::{Deserialize, Serialize};

/// Lifecycle states of the scanning step.
///
/// `Requesting` and `Animating` overlap in time: the network call is
/// fire-and-forget relative to the progress ticker, and only the ticker
/// observes the completion flag and moves the machine forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanState {
    Idle,
    Requesting,
    Animating,
    Complete,
    Transitioning,
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Animating => "animating",
            Self::Complete => "complete",
            Self::Transitioning => "transitioning",
        }
    }
}
