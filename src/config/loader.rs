//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), routes = config.routes.len(), "Configuration loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [navigation]
            base_url = "https://app.test/"
            resolve_timeout_ms = 2500

            [logging]
            level = "lekko=debug"
            format = "pretty"

            [[routes]]
            path = "/"
            view = "home"

            [[routes]]
            path = "/reports/*"
            view = "reports"
            lazy = true
            load_delay_ms = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert!(config.routes[1].lazy);
        assert_eq!(config.routes[1].load_delay_ms, 30);
        assert_eq!(
            config.navigation.resolve_timeout(),
            Some(std::time::Duration::from_millis(2500))
        );
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(config.navigation.base_url, "http://localhost/");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[routes]]\npath = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("[[routes]]\npath = \"about\"\nview = \"\"").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("must start with '/'"));
        assert!(msg.contains("view name is empty"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/lekko.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
