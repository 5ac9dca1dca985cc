use clap::Subcommand;
use std::path::PathBuf;
use crate::enums::group_by::GroupBy;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a sample configuration file
    Init,
    /// Submit a repository for analysis and watch the scan progress
    Scan {
        /// GitHub repository URL (prompted for interactively when omitted)
        url: Option<String>,
    },
    /// Render the results of the last scan
    Results {
        #[clap(short, long, value_enum, default_value_t = GroupBy::None)]
        group_by: GroupBy,
        /// Expand issue details instead of the collapsed summary rows
        #[clap(short, long)]
        expand: bool,
        /// Include dependency-package vulnerability tables
        #[clap(short, long)]
        packages: bool,
    },
    /// Export the last scan as a plain-text report
    Report {
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Clear the stored scan session
    Clear,
    /// Validate the configuration file
    Validate,
}
