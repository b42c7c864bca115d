//! The batch processor: discovery, dispatch, aggregation.
//!
//! Files fan out over a worker pool bounded at `min(8, file count)`. Every
//! per-file failure mode becomes a `FixResult` — unreadable files, unknown
//! languages, even a panicking worker — so one bad file never aborts a
//! batch. Results arrive in completion order; callers must not assume any
//! correspondence with discovery order.

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::language::{self, Language};
use crate::stats::{RunStats, Statistics};
use crate::tools::{ToolBridge, ToolKind};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

/// Ceiling on concurrent file dispatch.
const MAX_WORKERS: usize = 8;

/// Directory names never descended into during discovery.
const SKIP_DIRS: [&str; 6] = ["node_modules", "__pycache__", "vendor", "target", "build", "dist"];

/// The immutable outcome record for one processed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixResult {
    pub file_path: String,
    pub original_errors: Vec<String>,
    pub fixes_applied: Vec<String>,
    /// True when at least one fix was applied or no issues were found.
    pub success: bool,
    pub language: Language,
    /// Wall-clock processing time in seconds.
    pub processing_time: f64,
    /// The external tool that ran, `"patterns"` for the internal engine,
    /// `"none"` for files that never reached it.
    pub tool_used: String,
}

impl FixResult {
    /// Sentinel for paths that never reached the pipeline.
    pub fn failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
            original_errors: vec![message.into()],
            fixes_applied: Vec::new(),
            success: false,
            language: Language::Unknown,
            processing_time: 0.0,
            tool_used: "none".to_string(),
        }
    }
}

/// The fixing pipeline: classifier, rule engine, formatter bridge and the
/// statistics aggregate, owned together so independent instances never share
/// state.
pub struct SyntaxFixer {
    analyzer: Analyzer,
    bridge: ToolBridge,
    stats: Statistics,
    config: Config,
    write_back: bool,
}

impl SyntaxFixer {
    /// Build from configuration, probing external tools unless disabled.
    pub fn new(config: Config) -> Self {
        let bridge = if config.tools.enabled {
            ToolBridge::probe()
        } else {
            ToolBridge::disabled()
        };
        Self::with_bridge(config, bridge)
    }

    /// Build with an explicit bridge; tests inject [`ToolBridge::disabled`]
    /// to stay hermetic.
    pub fn with_bridge(config: Config, bridge: ToolBridge) -> Self {
        let analyzer = Analyzer::with_disabled(config.global.disable.iter().cloned());
        Self {
            analyzer,
            bridge,
            stats: Statistics::new(),
            config,
            write_back: false,
        }
    }

    /// Persist corrected content back to files processed via [`fix_tree`].
    ///
    /// [`fix_tree`]: SyntaxFixer::fix_tree
    pub fn with_write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back;
        self
    }

    /// Non-blocking snapshot of the running statistics.
    pub fn stats_snapshot(&self) -> RunStats {
        self.stats.snapshot()
    }

    /// Fix one in-memory file, discarding the corrected text.
    pub fn fix_content(&self, path: &str, content: &str) -> FixResult {
        self.correct(path, content).0
    }

    /// Fix one in-memory file, returning the result and the corrected text.
    pub fn correct(&self, path: &str, content: &str) -> (FixResult, String) {
        let start = Instant::now();
        let language = language::detect_language(path, Some(content));
        if language == Language::Unknown {
            // Unknown files bypass the engine and the statistics.
            let result = FixResult {
                file_path: path.to_string(),
                original_errors: vec!["Unknown file type".to_string()],
                fixes_applied: Vec::new(),
                success: false,
                language,
                processing_time: start.elapsed().as_secs_f64(),
                tool_used: "none".to_string(),
            };
            return (result, content.to_string());
        }

        let analysis = self.analyzer.analyze(content, language);
        let mut errors = analysis.issues;
        let mut fixes = analysis.fixes;
        let mut corrected = analysis.content;
        let mut tool_used = "patterns".to_string();

        if self.config.tools.enabled {
            for &tool in ToolKind::for_language(language) {
                let outcome = self.bridge.run(tool, path, &corrected);
                if outcome.success {
                    corrected = outcome.content;
                    fixes.push(format!("Applied {} formatting", tool.name()));
                    tool_used = tool.name().to_string();
                    break;
                }
                errors.extend(outcome.diagnostics);
            }
        }

        let elapsed = start.elapsed();
        self.stats.record(fixes.len(), elapsed);

        let result = FixResult {
            file_path: path.to_string(),
            success: !fixes.is_empty() || errors.is_empty(),
            original_errors: errors,
            fixes_applied: fixes,
            language,
            processing_time: elapsed.as_secs_f64(),
            tool_used,
        };
        (result, corrected)
    }

    /// Fix every eligible file under `root`, in completion order.
    ///
    /// A missing root or an empty discovery yields a single sentinel failure
    /// result rather than an empty list.
    pub fn fix_tree(&self, root: &Path) -> Vec<FixResult> {
        if !root.exists() {
            return vec![FixResult::failure(
                root.to_string_lossy(),
                "Path does not exist",
            )];
        }
        let files = self.discover(root);
        if files.is_empty() {
            return vec![FixResult::failure(
                root.to_string_lossy(),
                "No supported files found",
            )];
        }

        // Reads are synchronous and up front; a file that cannot be read
        // fails here without ever occupying a worker slot.
        let mut results = Vec::with_capacity(files.len());
        let mut tasks: Vec<(String, String)> = Vec::with_capacity(files.len());
        for path in files {
            let display = path.to_string_lossy().into_owned();
            match fs::read_to_string(&path) {
                Ok(content) => tasks.push((display, content)),
                Err(err) => {
                    results.push(FixResult::failure(display, format!("Cannot read file: {err}")));
                }
            }
        }
        if tasks.is_empty() {
            return results;
        }

        let workers = tasks.len().min(MAX_WORKERS);
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => {
                let (tx, rx) = mpsc::channel();
                pool.install(|| {
                    tasks.par_iter().for_each_with(tx, |tx, (path, content)| {
                        let _ = tx.send(self.process_one(path, content));
                    });
                });
                results.extend(rx.iter());
            }
            Err(err) => {
                log::warn!("failed to build worker pool, processing sequentially: {err}");
                results.extend(tasks.iter().map(|(path, content)| self.process_one(path, content)));
            }
        }
        results
    }

    /// One unit of work. A panic becomes a failure result, never a dead
    /// batch.
    fn process_one(&self, path: &str, content: &str) -> FixResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let (mut result, corrected) = self.correct(path, content);
            if self.write_back && result.success && corrected != content {
                if let Err(err) = fs::write(path, &corrected) {
                    result.original_errors.push(format!("Cannot write file: {err}"));
                    result.success = false;
                }
            }
            result
        }));
        outcome.unwrap_or_else(|_| FixResult::failure(path, "Unexpected processing failure"))
    }

    /// Enumerate eligible files: supported extensions only, hidden entries
    /// and dependency directories skipped.
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        if root.is_file() {
            return if has_supported_extension(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            };
        }

        let exclude = build_exclude_set(&self.config.global.exclude);
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(self.config.global.respect_gitignore)
            .parents(self.config.global.respect_gitignore)
            .require_git(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && SKIP_DIRS.contains(&entry.file_name().to_string_lossy().as_ref()))
            });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if !has_supported_extension(&path) {
                continue;
            }
            if let Some(exclude) = &exclude {
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if exclude.is_match(relative) {
                    log::debug!("excluded by config: {}", path.display());
                    continue;
                }
            }
            files.push(path);
        }
        files.sort();
        files
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(language::is_supported_extension)
}

fn build_exclude_set(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => log::warn!("ignoring invalid exclude pattern {pattern:?}: {err}"),
        }
    }
    match builder.build() {
        Ok(set) => Some(set),
        Err(err) => {
            log::warn!("exclude patterns disabled: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tools disabled in config: the bridge loop is skipped entirely.
    fn fixer() -> SyntaxFixer {
        let mut config = Config::default();
        config.tools.enabled = false;
        SyntaxFixer::with_bridge(config, ToolBridge::disabled())
    }

    #[test]
    fn unknown_language_is_reported_not_raised() {
        let result = fixer().fix_content("notes.txt", "just some text");
        assert!(!result.success);
        assert_eq!(result.original_errors, vec!["Unknown file type"]);
        assert!(result.fixes_applied.is_empty());
        assert_eq!(result.language, Language::Unknown);
        assert_eq!(result.tool_used, "none");
    }

    #[test]
    fn unknown_language_bypasses_statistics() {
        let fixer = fixer();
        fixer.fix_content("notes.txt", "just some text");
        assert_eq!(fixer.stats_snapshot().files_processed, 0);
    }

    #[test]
    fn clean_file_is_trivially_successful() {
        let fixer = fixer();
        let result = fixer.fix_content("ok.py", "x = 1\n");
        assert!(result.success);
        assert!(result.original_errors.is_empty());
        assert!(result.fixes_applied.is_empty());
        assert_eq!(result.tool_used, "patterns");
        assert_eq!(fixer.stats_snapshot().files_processed, 1);
    }

    #[test]
    fn unavailable_tools_add_diagnostics_but_keep_engine_output() {
        // Tools enabled in config, but every probe failed: the bridge fails
        // fast per tool and the diagnostics land in the result.
        let fixer = SyntaxFixer::with_bridge(Config::default(), ToolBridge::disabled());
        let (result, corrected) = fixer.correct("broken.py", "if x > 0");
        assert_eq!(corrected, "if x > 0:");
        // One engine issue plus one "not available" diagnostic per tool.
        assert!(result.original_errors.contains(&"Line 1: Missing colon".to_string()));
        assert!(result.original_errors.contains(&"Tool black not available".to_string()));
        assert!(result.original_errors.contains(&"Tool autopep8 not available".to_string()));
        assert!(result.original_errors.contains(&"Tool isort not available".to_string()));
        assert!(result.success);
        assert_eq!(result.tool_used, "patterns");
    }

    #[test]
    fn success_invariant_holds() {
        let fixer = fixer();
        for (path, content) in [
            ("a.py", "if x > 0"),
            ("b.py", "x = 1\n"),
            ("c.js", "var x = 5"),
            ("d.go", "import \"fmt\""),
        ] {
            let result = fixer.fix_content(path, content);
            assert_eq!(
                result.success,
                !result.fixes_applied.is_empty() || result.original_errors.is_empty(),
                "invariant violated for {path}"
            );
        }
    }

    #[test]
    fn diagnose_only_rule_yields_issue_without_fix_and_fails() {
        // The go import rule never changes the line, so a file with only
        // that issue has errors but no fixes.
        let fixer = fixer();
        let result = fixer.fix_content("main.go", "import \"fmt\"");
        assert_eq!(result.original_errors, vec!["Line 1: Single import outside a grouped block"]);
        assert!(result.fixes_applied.is_empty());
        assert!(!result.success);
    }
}
