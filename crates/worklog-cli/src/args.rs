use crate::types::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(
    about = "Report a user's GitHub, GitLab and Jira activity for a date range as JSON",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// First day of the report, DD-MM-YYYY
    #[arg(long, required_unless_present = "list_sources")]
    pub since: Option<String>,

    /// Last day of the report, DD-MM-YYYY (defaults to today)
    #[arg(long)]
    pub until: Option<String>,

    /// Configuration file (overrides WORKLOG_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Shorthand for --log-level debug
    #[arg(long)]
    pub debug: bool,

    /// Log verbosity; RUST_LOG applies when omitted
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Print the supported source types and their settings
    #[arg(long)]
    pub list_sources: bool,
}

impl Cli {
    /// Level requested on the command line, if any
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}
