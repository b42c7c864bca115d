//! Go fix rules.
//!
//! ## brace_spacing
//!
//! An opening brace glued to the preceding identifier at the end of a line
//! gets a space: `x := Config{` → `x := Config {`.
//!
//! ## import_grouping
//!
//! Single-line string imports are flagged but never rewritten; gofmt owns
//! the real fix, so the transform is the identity.

use crate::rule::{FixError, Matcher, Rule};
use regex::Regex;
use std::sync::LazyLock;

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "brace_spacing",
            "Missing space before opening brace",
            Matcher::Plain(Regex::new(r"\w\{\s*$").unwrap()),
            space_before_brace,
        ),
        Rule::new(
            "import_grouping",
            "Single import outside a grouped block",
            Matcher::Plain(Regex::new(r#"^import\s+"[^"]*"\s*$"#).unwrap()),
            leave_unchanged,
        ),
    ]
});

pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

static GLUED_BRACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)\{(\s*)$").unwrap());

fn space_before_brace(line: &str) -> Result<String, FixError> {
    Ok(GLUED_BRACE.replace(line, "$1 {$2").into_owned())
}

fn leave_unchanged(line: &str) -> Result<String, FixError> {
    Ok(line.to_string())
}
