use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "secureai")]
#[clap(about = "Security scanner for GitHub repositories", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
