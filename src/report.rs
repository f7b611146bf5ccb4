//! Report rendering
//!
//! Turns a [`Report`] into the text written to stdout.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::check::Report;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Json,
    /// Plain text, one line per check
    Standard,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Standard => "standard",
        }
    }

    /// All supported formats, for help and error messages
    pub fn supported() -> &'static [Self] {
        &[OutputFormat::Json, OutputFormat::Standard]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::supported()
            .iter()
            .find(|format| format.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let supported: Vec<&str> = OutputFormat::supported()
                    .iter()
                    .map(OutputFormat::as_str)
                    .collect();
                format!(
                    "Unsupported output format '{}'. Supported formats: {}",
                    s,
                    supported.join(", ")
                )
            })
    }
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Standard => Ok(render_standard(report)),
    }
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

pub fn render_standard(report: &Report) -> String {
    let mut out = String::new();

    for error in &report.errors {
        out.push_str(&format!("Error: {}\n", error));
    }

    for resource in &report.resources {
        out.push_str(&format!(
            "{} {}/{}\n",
            resource.kind, resource.namespace, resource.name
        ));
        for check in &resource.checks {
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                check.verdict(),
                check.id(),
                check.message()
            ));
        }
    }

    out
}
