use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use worklog_types::SectionConfig;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "WORKLOG_CONFIG";

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. WORKLOG_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/worklog/config.toml`
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV)
        && !env_path.trim().is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("worklog").join("config.toml"));
    }

    anyhow::bail!(
        "Could not determine configuration path: pass --config or set {}",
        CONFIG_ENV
    )
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Named sections of the configuration file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    sections: Vec<(String, SectionConfig)>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let table: Table = toml::from_str(content)?;
        let mut sections = Vec::new();

        for (name, value) in table {
            let Value::Table(entries) = value else {
                tracing::warn!(key = %name, "Ignoring top-level key outside any section");
                continue;
            };
            sections.push((name.clone(), section_from_table(&name, entries)));
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[(String, SectionConfig)] {
        &self.sections
    }
}

fn section_from_table(section: &str, entries: Table) -> SectionConfig {
    let mut config = SectionConfig::new();
    for (key, value) in entries {
        match scalar_to_string(value) {
            Some(text) => config.insert(key, text),
            None => tracing::warn!(section, key = %key, "Ignoring non-scalar setting"),
        }
    }
    config
}

/// Scalars become their string form; arrays and tables have no string form
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
