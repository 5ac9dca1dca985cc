use serde::{Deserialize, Serialize};
use crate::structs::config::backend_config::BackendConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::scanner_config::ScannerConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            scanner: ScannerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
