use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScannerConfig {
    /// Progress ticker interval in milliseconds.
    #[serde(default = "ConfigHelper::default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum progress percentage the animation may reach without
    /// confirmation that the backend call completed.
    #[serde(default = "ConfigHelper::default_soft_ceiling")]
    pub soft_ceiling: f64,

    /// Pause between hitting 100% and transitioning to the results step,
    /// in milliseconds.
    #[serde(default = "ConfigHelper::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: ConfigHelper::default_tick_interval_ms(),
            soft_ceiling: ConfigHelper::default_soft_ceiling(),
            settle_delay_ms: ConfigHelper::default_settle_delay_ms(),
        }
    }
}
