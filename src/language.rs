//! Language classification for source files.
//!
//! Extension lookup always wins. Content signatures are a fallback that
//! requires at least two distinct patterns to match before a language is
//! chosen; the first language in table order to reach the threshold wins, so
//! classification is deterministic. The whole module is side-effect free.

use phf::phf_map;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Closed set of languages the fixer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    Java,
    Cpp,
    C,
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File extension (lowercase, without the dot) to language.
static EXTENSIONS: phf::Map<&'static str, Language> = phf_map! {
    "py" => Language::Python,
    "js" => Language::JavaScript,
    "jsx" => Language::JavaScript,
    "mjs" => Language::JavaScript,
    "ts" => Language::TypeScript,
    "tsx" => Language::TypeScript,
    "go" => Language::Go,
    "rs" => Language::Rust,
    "java" => Language::Java,
    "cpp" => Language::Cpp,
    "cc" => Language::Cpp,
    "cxx" => Language::Cpp,
    "hpp" => Language::Cpp,
    "c" => Language::C,
    "h" => Language::C,
};

/// A language is only inferred from content when this many distinct
/// signature patterns match.
const SIGNATURE_THRESHOLD: usize = 2;

/// Per-language content signatures, in tie-break order.
static SIGNATURES: LazyLock<Vec<(Language, Vec<Regex>)>> = LazyLock::new(|| {
    fn compile(patterns: &[&str]) -> Vec<Regex> {
        patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
    }
    vec![
        (
            Language::Python,
            compile(&[
                r"(?m)^\s*def\s+",
                r"(?m)^\s*class\s+",
                r"(?m)^\s*import\s+",
                r"(?m)^\s*from\s+.+import",
            ]),
        ),
        (
            Language::JavaScript,
            compile(&[
                r"(?m)^\s*function\s+",
                r"(?m)^\s*const\s+",
                r"(?m)^\s*let\s+",
                r"require\(",
            ]),
        ),
        (
            Language::Go,
            compile(&[
                r"(?m)^\s*package\s+",
                r"(?m)^\s*func\s+",
                r"(?m)^\s*import\s+\(",
                r"(?m)^\s*var\s+",
            ]),
        ),
        (
            Language::Rust,
            compile(&[
                r"(?m)^\s*fn\s+",
                r"(?m)^\s*pub\s+",
                r"(?m)^\s*use\s+",
                r"(?m)^\s*struct\s+",
            ]),
        ),
        (
            Language::Java,
            compile(&[r"(?m)^\s*public\s+class", r"(?m)^\s*package\s+", r"(?m)^\s*import\s+"]),
        ),
    ]
});

/// Whether `ext` (without the dot) belongs to a supported language.
pub fn is_supported_extension(ext: &str) -> bool {
    EXTENSIONS.contains_key(ext.to_ascii_lowercase().as_str())
}

/// Classify a file by name and, as a fallback, by content.
pub fn detect_language(path: &str, content: Option<&str>) -> Language {
    if let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) {
        if let Some(&language) = EXTENSIONS.get(ext.to_ascii_lowercase().as_str()) {
            return language;
        }
    }

    let Some(content) = content else {
        return Language::Unknown;
    };
    for (language, patterns) in SIGNATURES.iter() {
        let matched = patterns.iter().filter(|p| p.is_match(content)).count();
        if matched >= SIGNATURE_THRESHOLD {
            return *language;
        }
    }
    Language::Unknown
}
