//! Per-language fix rule tables.
//!
//! Tables are static and ordered. Evaluation order is significant: every
//! matching rule's transform is applied to the line as originally read, so
//! when several rules match the same line the last one's output wins.

pub mod go;
pub mod javascript;
pub mod python;

use crate::language::Language;
use crate::rule::Rule;

/// The ordered rule table for a language. Languages without heuristics get
/// an empty table and the engine passes their content through untouched.
pub fn rules_for(language: Language) -> &'static [Rule] {
    match language {
        Language::Python => python::rules(),
        // The original implementation runs the javascript fixes against
        // typescript sources before anything typescript-specific.
        Language::JavaScript | Language::TypeScript => javascript::rules(),
        Language::Go => go::rules(),
        _ => &[],
    }
}

/// Every configured rule, paired with its language, for listings.
pub fn rule_catalog() -> Vec<(Language, &'static Rule)> {
    let mut catalog = Vec::new();
    for language in [Language::Python, Language::JavaScript, Language::Go] {
        for rule in rules_for(language) {
            catalog.push((language, rule));
        }
    }
    catalog
}
