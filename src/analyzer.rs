//! The heuristic rule engine.
//!
//! Scans content line by line against the language's rule table. Every
//! matching rule's transform is applied to the line as originally read (no
//! re-matching after mutation within a pass), a failing transform is recorded
//! as a diagnostic and processing continues. Results are cached by
//! (language, content hash) for the lifetime of the analyzer; the cache is
//! unbounded, so memory grows with the number of distinct inputs seen.

use crate::language::Language;
use crate::rule::Rule;
use crate::rules;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Outcome of analyzing one piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Discovered issues, `"Line N: <description>"`.
    pub issues: Vec<String>,
    /// Applied fixes and fix-attempt diagnostics.
    pub fixes: Vec<String>,
    /// The corrected content.
    pub content: String,
}

impl Analysis {
    fn unchanged(content: &str) -> Self {
        Self {
            issues: Vec::new(),
            fixes: Vec::new(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Analyzer {
    cache: Mutex<HashMap<(Language, String), Analysis>>,
    disabled: HashSet<String>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An analyzer that skips the named rules.
    pub fn with_disabled<I>(disabled: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            cache: Mutex::new(HashMap::new()),
            disabled: disabled.into_iter().collect(),
        }
    }

    /// Run the language's rule table over `content`. A language without
    /// configured rules is a no-op, not an error.
    pub fn analyze(&self, content: &str, language: Language) -> Analysis {
        let active: Vec<&Rule> = rules::rules_for(language)
            .iter()
            .filter(|rule| !self.disabled.contains(rule.name()))
            .collect();
        if active.is_empty() {
            return Analysis::unchanged(content);
        }

        let key = (language, blake3::hash(content.as_bytes()).to_hex().to_string());
        if let Some(hit) = self.cache.lock().unwrap().get(&key) {
            log::debug!("analysis cache hit for {language}");
            return hit.clone();
        }

        let analysis = run_rules(content, &active);
        // A racing insert recomputes the same value; wasted work, not a bug.
        self.cache.lock().unwrap().insert(key, analysis.clone());
        analysis
    }

    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

fn run_rules(content: &str, rules: &[&Rule]) -> Analysis {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let mut issues = Vec::new();
    let mut fixes = Vec::new();

    for (index, original) in content.split('\n').enumerate() {
        for rule in rules {
            if !rule.matches(original) {
                continue;
            }
            issues.push(format!("Line {}: {}", index + 1, rule.description()));
            match rule.apply(original) {
                Ok(fixed) if fixed != original => {
                    fixes.push(format!("Fixed {} on line {}", rule.name(), index + 1));
                    lines[index] = fixed;
                }
                Ok(_) => {}
                Err(err) => {
                    fixes.push(format!(
                        "Attempted {} fix on line {}: {err}",
                        rule.name(),
                        index + 1
                    ));
                }
            }
        }
    }

    Analysis {
        issues,
        fixes,
        content: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{FixError, Matcher};
    use regex::Regex;

    #[test]
    fn python_missing_colon_end_to_end() {
        let analyzer = Analyzer::new();
        let analysis = analyzer.analyze("if x > 0", Language::Python);
        assert_eq!(analysis.issues, vec!["Line 1: Missing colon"]);
        assert_eq!(analysis.fixes, vec!["Fixed missing_colon on line 1"]);
        assert_eq!(analysis.content, "if x > 0:");
    }

    #[test]
    fn unconfigured_language_is_a_noop() {
        let analyzer = Analyzer::new();
        let content = "fn main() {}\n";
        let analysis = analyzer.analyze(content, Language::Rust);
        assert!(analysis.issues.is_empty());
        assert!(analysis.fixes.is_empty());
        assert_eq!(analysis.content, content);
        // No-ops never reach the cache.
        assert_eq!(analyzer.cache_len(), 0);
    }

    #[test]
    fn identical_inputs_are_served_from_cache() {
        let analyzer = Analyzer::new();
        let first = analyzer.analyze("var x = 5", Language::JavaScript);
        assert_eq!(analyzer.cache_len(), 1);
        let second = analyzer.analyze("var x = 5", Language::JavaScript);
        assert_eq!(analyzer.cache_len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn cache_is_keyed_by_language_too() {
        let analyzer = Analyzer::new();
        analyzer.analyze("var x = 5", Language::JavaScript);
        analyzer.analyze("var x = 5", Language::Go);
        assert_eq!(analyzer.cache_len(), 2);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let analyzer = Analyzer::with_disabled(["missing_colon".to_string()]);
        let analysis = analyzer.analyze("if x > 0", Language::Python);
        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.content, "if x > 0");
    }

    fn explode(_: &str) -> Result<String, FixError> {
        Err(FixError::FixFailed("boom".to_string()))
    }

    #[test]
    fn failing_transform_is_a_diagnostic_not_an_abort() {
        let failing = Rule::new(
            "explode",
            "Always explodes",
            Matcher::Plain(Regex::new("x").unwrap()),
            explode,
        );
        let analysis = run_rules("x = 1\ny = 2", &[&failing]);
        assert_eq!(analysis.issues, vec!["Line 1: Always explodes"]);
        assert_eq!(
            analysis.fixes,
            vec!["Attempted explode fix on line 1: fix failed: boom"]
        );
        // Content is unchanged and the second line was still scanned.
        assert_eq!(analysis.content, "x = 1\ny = 2");
    }

    #[test]
    fn transforms_act_on_the_line_as_originally_read() {
        // Both rules match; the second one's output wins because transforms
        // are applied to the original line, not to the first rule's output.
        let analyzer = Analyzer::new();
        let analysis = analyzer.analyze("var x = 5", Language::JavaScript);
        assert_eq!(
            analysis.issues,
            vec!["Line 1: Missing semicolon", "Line 1: Use const instead of var"]
        );
        assert_eq!(
            analysis.fixes,
            vec!["Fixed missing_semicolon on line 1", "Fixed var_to_const on line 1"]
        );
        assert_eq!(analysis.content, "const x = 5");
    }

    #[test]
    fn line_numbers_are_one_based_across_lines() {
        let analyzer = Analyzer::new();
        let analysis = analyzer.analyze("x = 1\nif x > 0\n    pass", Language::Python);
        assert_eq!(analysis.issues, vec!["Line 2: Missing colon"]);
        assert_eq!(analysis.content, "x = 1\nif x > 0:\n    pass");
    }
}
