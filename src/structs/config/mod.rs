pub mod backend_config;
pub mod config;
pub mod output_config;
pub mod scanner_config;
