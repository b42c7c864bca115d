//! Core types for the heuristic fix rules.
//!
//! A rule is static data: a matcher over a single line, a pure transform and
//! a human-readable description. Rule tables never mutate at runtime; each
//! language holds its rules in a fixed evaluation order (see
//! [`crate::rules`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("fix failed: {0}")]
    FixFailed(String),
}

/// Line matcher. Most rules compile to plain regexes; rules that need
/// look-around use the fancy engine.
#[derive(Debug)]
pub enum Matcher {
    Plain(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl Matcher {
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Matcher::Plain(re) => re.is_match(line),
            Matcher::Fancy(re) => re.is_match(line).unwrap_or_else(|err| {
                log::debug!("look-around match failed: {err}");
                false
            }),
        }
    }
}

/// A pure line transform. Returning the input unchanged means the rule had
/// nothing to fix on this line.
pub type Transform = fn(&str) -> Result<String, FixError>;

/// A named single-line fix heuristic.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    description: &'static str,
    matcher: Matcher,
    transform: Transform,
}

impl Rule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        matcher: Matcher,
        transform: Transform,
    ) -> Self {
        Self {
            name,
            description,
            matcher,
            transform,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn matches(&self, line: &str) -> bool {
        self.matcher.is_match(line)
    }

    pub fn apply(&self, line: &str) -> Result<String, FixError> {
        (self.transform)(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn upper(line: &str) -> Result<String, FixError> {
        Ok(line.to_uppercase())
    }

    #[test]
    fn rule_matches_and_applies() {
        let rule = Rule::new(
            "upper",
            "Uppercase everything",
            Matcher::Plain(Regex::new("[a-z]").unwrap()),
            upper,
        );
        assert!(rule.matches("abc"));
        assert!(!rule.matches("ABC"));
        assert_eq!(rule.apply("abc").unwrap(), "ABC");
    }

    #[test]
    fn fancy_matcher_supports_look_around() {
        let matcher = Matcher::Fancy(fancy_regex::Regex::new(r"(?<!=)==(?!=)").unwrap());
        assert!(matcher.is_match("a == b"));
        assert!(!matcher.is_match("a === b"));
    }
}
