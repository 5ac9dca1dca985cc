pub mod commands;
pub mod group_by;
pub mod scan_state;
pub mod severity;
