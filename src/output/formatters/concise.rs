//! Concise output formatter: one line per issue or fix

use crate::output::OutputFormatter;
use crate::processor::FixResult;

/// Concise format: `file: [issue|fix] message`
#[derive(Default)]
pub struct ConciseFormatter;

impl ConciseFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for ConciseFormatter {
    fn format_results(&self, results: &[FixResult]) -> String {
        let mut output = String::new();
        for result in results {
            for issue in &result.original_errors {
                output.push_str(&format!("{}: [issue] {}\n", result.file_path, issue));
            }
            for fix in &result.fixes_applied {
                output.push_str(&format!("{}: [fix] {}\n", result.file_path, fix));
            }
        }
        output
    }
}
