mod args;
mod commands;
pub mod config;
pub mod logging;
pub mod types;

pub use args::Cli;
pub use commands::{collect_outcomes, render_report, run};
