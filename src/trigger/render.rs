// Render a NATSTrigger manifest for --dryrun.

use std::fmt;
use std::str::FromStr;

use crate::error::TriggerError;
use crate::types::NATSTrigger;

pub const OUTPUT_FORMATS: [&str; 2] = ["yaml", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(TriggerError::Render(format!(
                "output format {:?} is not supported, must be one of: {}",
                other,
                OUTPUT_FORMATS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Serializes `trigger` without contacting the cluster.
pub fn render(format: OutputFormat, trigger: &NATSTrigger) -> Result<String, TriggerError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(trigger).map_err(|e| TriggerError::Render(e.to_string())),
        OutputFormat::Json => {
            serde_json::to_string_pretty(trigger).map_err(|e| TriggerError::Render(e.to_string()))
        }
    }
}
