//! Known external tools and their fixed command-line forms.

use crate::language::Language;
use std::path::Path;

/// External formatting tools the bridge knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Black,
    Autopep8,
    Isort,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Black, ToolKind::Autopep8, ToolKind::Isort];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Black => "black",
            ToolKind::Autopep8 => "autopep8",
            ToolKind::Isort => "isort",
        }
    }

    /// Argv for the startup availability probe.
    pub fn version_argv(self) -> Vec<String> {
        vec![self.name().to_string(), "--version".to_string()]
    }

    /// Argv for an in-place fix run against `file`.
    pub fn fix_argv(self, file: &Path) -> Vec<String> {
        let file = file.to_string_lossy().into_owned();
        match self {
            ToolKind::Black => vec!["black".to_string(), "--quiet".to_string(), file],
            ToolKind::Autopep8 => vec![
                "autopep8".to_string(),
                "--in-place".to_string(),
                "--aggressive".to_string(),
                file,
            ],
            ToolKind::Isort => vec!["isort".to_string(), "--quiet".to_string(), file],
        }
    }

    /// Tools tried, in order, for a language. Only python carries bindings;
    /// every other language relies on the internal patterns.
    pub fn for_language(language: Language) -> &'static [ToolKind] {
        match language {
            Language::Python => &Self::ALL,
            _ => &[],
        }
    }
}
