//! rufix — a multi-language heuristic syntax fixer.
//!
//! Files are classified by language, scanned line-by-line against ordered
//! regex fix rules, optionally handed to external Python formatters, and
//! aggregated into per-file results plus running statistics. Batches fan out
//! over a bounded worker pool; every per-file failure becomes data, never a
//! batch abort.
//!
//! ```no_run
//! use rufix_lib::config::Config;
//! use rufix_lib::SyntaxFixer;
//!
//! let fixer = SyntaxFixer::new(Config::default());
//! let result = fixer.fix_content("demo.py", "if x > 0\n    pass\n");
//! assert!(!result.fixes_applied.is_empty());
//! ```

pub mod analyzer;
pub mod config;
pub mod exit_codes;
pub mod init;
pub mod language;
pub mod output;
pub mod processor;
pub mod report;
pub mod rule;
pub mod rules;
pub mod stats;
pub mod tools;

pub use analyzer::{Analysis, Analyzer};
pub use language::{Language, detect_language};
pub use processor::{FixResult, SyntaxFixer};
pub use report::{SummaryReport, summarize};
pub use stats::RunStats;
