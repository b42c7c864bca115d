//! Default configuration bootstrapping.

use std::io;
use std::path::Path;

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# rufix configuration
[global]
# Rule names to disable, e.g. ["missing_semicolon"]
disable = []
# Glob patterns excluded from discovery
exclude = []
# Respect .gitignore files when scanning directories
respect_gitignore = true

[tools]
# Run external python formatters (black, autopep8, isort) when available
enabled = true
"#;

/// Write the default config file. Refuses to overwrite an existing one.
pub fn create_default_config(path: &str) -> io::Result<()> {
    if Path::new(path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path} already exists"),
        ));
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn template_parses_to_the_default_config() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rufix.toml");
        let path = path.to_str().unwrap();
        create_default_config(path).unwrap();
        let err = create_default_config(path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
