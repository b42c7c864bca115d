//! Python fix rules.
//!
//! ## missing_colon
//!
//! Block headers (`if`, `for`, `def`, ...) missing the trailing colon:
//!
//! ```python
//! if x > 0      # becomes: if x > 0:
//! ```
//!
//! Lines that already contain a colon or a comment are left alone.
//!
//! ## print_parentheses
//!
//! Python 2 print statements become calls: `print 'hi'` → `print('hi')`.
//!
//! ## tab_indentation
//!
//! Leading tabs become four spaces each.

use crate::rule::{FixError, Matcher, Rule};
use regex::Regex;
use std::sync::LazyLock;

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "missing_colon",
            "Missing colon",
            Matcher::Plain(
                Regex::new(
                    r"^\s*(?:if|elif|else|for|while|def|class|try|except|finally|with)\b[^:#]*$",
                )
                .unwrap(),
            ),
            append_colon,
        ),
        Rule::new(
            "print_parentheses",
            "Print statement needs parentheses",
            Matcher::Plain(Regex::new(r"^\s*print\s+[^(].*[^)]$").unwrap()),
            wrap_print_call,
        ),
        Rule::new(
            "tab_indentation",
            "Tab indentation",
            Matcher::Plain(Regex::new(r"^\t+").unwrap()),
            expand_leading_tabs,
        ),
    ]
});

pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

fn append_colon(line: &str) -> Result<String, FixError> {
    Ok(format!("{}:", line.trim_end()))
}

static PRINT_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)print\s+(.+)$").unwrap());

fn wrap_print_call(line: &str) -> Result<String, FixError> {
    Ok(PRINT_STATEMENT.replace(line, "${1}print($2)").into_owned())
}

fn expand_leading_tabs(line: &str) -> Result<String, FixError> {
    let stripped = line.trim_start_matches('\t');
    let tabs = line.len() - stripped.len();
    Ok(format!("{}{}", "    ".repeat(tabs), stripped))
}
