use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use worklog_providers::{HttpClient, ReqwestHttpClient, create_adapter, get_all_sources};
use worklog_types::{DateRange, SourceOutcome};

use super::args::Cli;
use crate::config::{Config, resolve_config_path};

pub fn run(cli: Cli) -> Result<()> {
    if cli.list_sources {
        list_sources();
        return Ok(());
    }

    let range = date_range(cli.since.as_deref(), cli.until.as_deref())?;
    let config_path = resolve_config_path(cli.config.as_deref())?;
    tracing::debug!(path = %config_path.display(), "Loading configuration");
    let config = Config::load_from(&config_path)?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let outcomes = collect_outcomes(&config, &range, http);

    let report = render_report(&outcomes)?;
    write_report(&report, cli.output.as_deref())
}

fn date_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let since = since.context("--since is required")?;
    let since = DateRange::parse_date(since)?;
    let until = match until {
        Some(until) => DateRange::parse_date(until)?,
        None => Local::now().date_naive(),
    };
    Ok(DateRange::new(since, until)?)
}

/// Run every configured section in file order.
///
/// Sections without a `type`, with an unknown type, or whose settings do not
/// validate are logged and skipped; they never abort the run.
pub fn collect_outcomes(
    config: &Config,
    range: &DateRange,
    http: Arc<dyn HttpClient>,
) -> Vec<SourceOutcome> {
    let mut outcomes = Vec::new();

    for (name, section) in config.sections() {
        let Some(kind) = section.kind() else {
            tracing::error!(section = %name, "Section has no 'type', skipping");
            continue;
        };

        match create_adapter(section, http.clone()) {
            Ok(adapter) => outcomes.push(adapter.run(name, range)),
            Err(error) => {
                tracing::error!(section = %name, kind, %error, "Skipping section");
            }
        }
    }

    tracing::info!(sources = outcomes.len(), "Collected activity");
    outcomes
}

/// JSON array of outcomes, indented by four spaces
pub fn render_report(outcomes: &[SourceOutcome]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    outcomes.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_report(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", report))
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", report),
    }
    Ok(())
}

fn list_sources() {
    for source in get_all_sources() {
        println!("{:<8} {}", source.name, source.description);
        println!("{:<8} required: {}", "", source.required.join(", "));
        if !source.optional.is_empty() {
            println!("{:<8} optional: {}", "", source.optional.join(", "));
        }
    }
}
