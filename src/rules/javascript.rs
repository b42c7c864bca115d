//! JavaScript (and TypeScript) fix rules.
//!
//! ## missing_semicolon
//!
//! Statement-shaped lines (`var`/`let`/`const` declarations, `return`,
//! `throw`, `break`, `continue`) that end without a terminator get one.
//! Block openers and already-terminated lines are skipped.
//!
//! ## var_to_const
//!
//! `var` declarations initialized with a literal become `const`.
//!
//! ## strict_equality
//!
//! Loose `==` comparisons become `===`. Look-around keeps `===`, `!=`, `<=`
//! and `>=` untouched.

use crate::rule::{FixError, Matcher, Rule};
use regex::Regex;
use std::sync::LazyLock;

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "missing_semicolon",
            "Missing semicolon",
            Matcher::Plain(
                Regex::new(r"^\s*(?:var|let|const|return|throw|break|continue)\b[^;{}]*[^;{}\s]$")
                    .unwrap(),
            ),
            append_semicolon,
        ),
        Rule::new(
            "var_to_const",
            "Use const instead of var",
            Matcher::Plain(Regex::new(r#"^\s*var\s+\w+\s*=\s*["'\d\[{]"#).unwrap()),
            replace_var_with_const,
        ),
        Rule::new(
            "strict_equality",
            "Use strict equality",
            Matcher::Fancy(fancy_regex::Regex::new(r"(?<![=!<>])==(?!=)").unwrap()),
            strengthen_equality,
        ),
    ]
});

pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

fn append_semicolon(line: &str) -> Result<String, FixError> {
    Ok(format!("{};", line.trim_end()))
}

static VAR_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bvar\s+").unwrap());

fn replace_var_with_const(line: &str) -> Result<String, FixError> {
    Ok(VAR_KEYWORD.replace(line, "const ").into_owned())
}

static LOOSE_EQUALITY: LazyLock<fancy_regex::Regex> =
    LazyLock::new(|| fancy_regex::Regex::new(r"(?<![=!<>])==(?!=)").unwrap());

fn strengthen_equality(line: &str) -> Result<String, FixError> {
    let mut result = String::with_capacity(line.len() + 2);
    let mut last = 0;
    for found in LOOSE_EQUALITY.find_iter(line) {
        let found = found.map_err(|err| FixError::FixFailed(err.to_string()))?;
        result.push_str(&line[last..found.start()]);
        result.push_str("===");
        last = found.end();
    }
    result.push_str(&line[last..]);
    Ok(result)
}
