use clap::{Parser, Subcommand};
use std::path::PathBuf;
use task_core::config::ConfigOverrides;
use task_core::error::AppError;
use task_core::model::TaskStatus;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track tasks in a JSON file", long_about = None)]
pub struct Cli {
    /// Task file to load from and save to
    pub file: PathBuf,

    /// Run one command and save; without a command the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task with status NEW
    ///
    /// Example: task_tracker tasks.json add "Write spec" "First draft"
    Add {
        title: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Change the status of the first task with the given title
    ///
    /// Example: task_tracker tasks.json status "Write spec" in_progress
    Status {
        title: String,
        /// One of NEW, IN_PROGRESS, IN_REVIEW, COMPLETED, CANCELED
        status: TaskStatus,
    },
    /// Cancel the first task with the given title
    ///
    /// Example: task_tracker tasks.json cancel "Write spec"
    Cancel { title: String },
    /// List all tasks
    ///
    /// Example: task_tracker tasks.json list
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Color,
    AtomicSave,
    LogFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// `Atomic-Save`, `atomic save` and `atomic_save` all name the same field.
fn normalize_key(raw: &str) -> String {
    raw.split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let key = normalize_key(key_raw);
    let target = match key.as_str() {
        "" => return Err("override key cannot be empty".to_string()),
        "color" | "colour" => ConfigOverrideTarget::Color,
        "atomic_save" => ConfigOverrideTarget::AtomicSave,
        "log_filter" | "log" => ConfigOverrideTarget::LogFilter,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride {
        target,
        value: value_raw.trim().to_string(),
    })
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Color => {
                overrides.color =
                    Some(parse_flag(&parsed.value).map_err(AppError::invalid_input)?);
            }
            ConfigOverrideTarget::AtomicSave => {
                overrides.atomic_save =
                    Some(parse_flag(&parsed.value).map_err(AppError::invalid_input)?);
            }
            ConfigOverrideTarget::LogFilter => overrides.log_filter = Some(parsed.value),
        }
    }

    Ok(overrides)
}
