//! Output formatting for fix results.
//!
//! Mirrors the linter convention of one formatter per output style, selected
//! by name on the command line.

use crate::processor::FixResult;

pub mod formatters;

pub use formatters::*;

/// Trait for result formatters
pub trait OutputFormatter {
    /// Format a batch of results for output
    fn format_results(&self, results: &[FixResult]) -> String;

    /// Whether this formatter should use colors
    fn use_colors(&self) -> bool {
        false
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// Default human-readable format with colors and per-file detail
    Text,
    /// Concise format: one line per issue or fix
    Concise,
    /// JSON array of result objects
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" | "full" => Ok(OutputFormat::Text),
            "concise" => Ok(OutputFormat::Concise),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }

    /// Create a formatter instance for this format
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Concise => Box::new(ConciseFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}
