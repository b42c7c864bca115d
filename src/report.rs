//! Summary reporting over a batch of fix results.

use crate::language::Language;
use crate::processor::FixResult;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_files: usize,
    pub successful_files: usize,
    /// Fraction of successful files, as a percentage.
    pub success_rate: f64,
    pub total_errors_found: usize,
    pub total_fixes_applied: usize,
    pub avg_processing_secs: f64,
    /// Fixes per discovered error.
    pub efficiency_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageBreakdown {
    pub files: usize,
    pub errors: usize,
    pub fixes: usize,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueCount {
    pub issue: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Throughput {
    pub files_per_second: f64,
    pub fixes_per_second: f64,
}

/// Derived, read-only aggregation over a list of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub summary: Totals,
    /// Keyed in first-seen order so rendered reports are stable.
    pub by_language: IndexMap<Language, LanguageBreakdown>,
    /// Up to ten most frequent issue descriptions.
    pub top_issues: Vec<IssueCount>,
    pub performance: Throughput,
}

/// Summarize a batch. `None` for an empty list.
pub fn summarize(results: &[FixResult]) -> Option<SummaryReport> {
    if results.is_empty() {
        return None;
    }

    let total_files = results.len();
    let successful_files = results.iter().filter(|r| r.success).count();
    let total_errors: usize = results.iter().map(|r| r.original_errors.len()).sum();
    let total_fixes: usize = results.iter().map(|r| r.fixes_applied.len()).sum();
    let total_secs: f64 = results.iter().map(|r| r.processing_time).sum();

    let mut by_language: IndexMap<Language, LanguageBreakdown> = IndexMap::new();
    for result in results {
        let entry = by_language.entry(result.language).or_default();
        entry.files += 1;
        entry.errors += result.original_errors.len();
        entry.fixes += result.fixes_applied.len();
    }
    for (language, breakdown) in by_language.iter_mut() {
        let successful = results
            .iter()
            .filter(|r| r.language == *language && r.success)
            .count();
        breakdown.success_rate = successful as f64 / breakdown.files as f64 * 100.0;
    }

    Some(SummaryReport {
        summary: Totals {
            total_files,
            successful_files,
            success_rate: successful_files as f64 / total_files as f64 * 100.0,
            total_errors_found: total_errors,
            total_fixes_applied: total_fixes,
            avg_processing_secs: total_secs / total_files as f64,
            efficiency_ratio: total_fixes as f64 / total_errors.max(1) as f64,
        },
        by_language,
        top_issues: top_issues(results),
        performance: Throughput {
            files_per_second: if total_secs > 0.0 {
                total_files as f64 / total_secs
            } else {
                0.0
            },
            fixes_per_second: if total_secs > 0.0 {
                total_fixes as f64 / total_secs
            } else {
                0.0
            },
        },
    })
}

/// Issue descriptions by frequency. `"Line 3: Missing colon"` counts as
/// `"Missing colon"`; ties break alphabetically for determinism.
fn top_issues(results: &[FixResult]) -> Vec<IssueCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for result in results {
        for issue in &result.original_errors {
            let kind = match issue.split_once(':') {
                Some((_, rest)) => rest.trim().to_string(),
                None => issue.clone(),
            };
            *counts.entry(kind).or_default() += 1;
        }
    }
    let mut ranked: Vec<IssueCount> = counts
        .into_iter()
        .map(|(issue, count)| IssueCount { issue, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.issue.cmp(&b.issue)));
    ranked.truncate(10);
    ranked
}
