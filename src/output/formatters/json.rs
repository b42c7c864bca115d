//! JSON output formatter

use crate::output::OutputFormatter;
use crate::processor::FixResult;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_results(&self, results: &[FixResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_default()
    }
}
