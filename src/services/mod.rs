pub mod grouping_engine;
pub mod issue_normalizer;
pub mod report_exporter;
pub mod scan_client;
pub mod scan_orchestrator;
pub mod session_store;
