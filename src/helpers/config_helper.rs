use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_REPORT_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_SOFT_CEILING, DEFAULT_TICK_INTERVAL_MS,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_tick_interval_ms() -> u64 {
        DEFAULT_TICK_INTERVAL_MS
    }

    pub fn default_soft_ceiling() -> f64 {
        DEFAULT_SOFT_CEILING
    }

    pub fn default_settle_delay_ms() -> u64 {
        DEFAULT_SETTLE_DELAY_MS
    }

    pub fn default_report_file() -> String {
        DEFAULT_REPORT_FILE_NAME.to_string()
    }
}
