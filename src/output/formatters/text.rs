//! Default text output formatter with colors and per-file detail

use crate::output::OutputFormatter;
use crate::processor::FixResult;
use colored::*;

/// Default human-readable formatter with colors
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_results(&self, results: &[FixResult]) -> String {
        let mut output = String::new();

        for result in results {
            let marker = if result.success { "✓" } else { "✗" };
            let header = format!(
                "{} ({}, {:.3}s, {}) {}",
                if self.use_colors {
                    result.file_path.blue().underline().to_string()
                } else {
                    result.file_path.clone()
                },
                result.language,
                result.processing_time,
                result.tool_used,
                if self.use_colors {
                    if result.success {
                        marker.green().to_string()
                    } else {
                        marker.red().to_string()
                    }
                } else {
                    marker.to_string()
                },
            );
            output.push_str(&header);
            output.push('\n');

            for issue in &result.original_errors {
                let line = if self.use_colors {
                    format!("  {} {}", "issue:".yellow(), issue)
                } else {
                    format!("  issue: {issue}")
                };
                output.push_str(&line);
                output.push('\n');
            }
            for fix in &result.fixes_applied {
                let line = if self.use_colors {
                    format!("  {} {}", "fix:".green(), fix)
                } else {
                    format!("  fix: {fix}")
                };
                output.push_str(&line);
                output.push('\n');
            }
        }

        output
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn plain_output_lists_issues_and_fixes() {
        let result = FixResult {
            file_path: "demo.py".to_string(),
            original_errors: vec!["Line 1: Missing colon".to_string()],
            fixes_applied: vec!["Fixed missing_colon on line 1".to_string()],
            success: true,
            language: Language::Python,
            processing_time: 0.001,
            tool_used: "patterns".to_string(),
        };
        let output = TextFormatter::without_colors().format_results(&[result]);
        assert!(output.contains("demo.py (python, 0.001s, patterns) ✓"));
        assert!(output.contains("  issue: Line 1: Missing colon"));
        assert!(output.contains("  fix: Fixed missing_colon on line 1"));
    }
}
