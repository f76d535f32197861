//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route declarations are usable
//! - Validate value ranges (timeouts > 0, URLs absolute)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Only config files are validated; templates passed in code are compiled as-is

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route #{index}: path {path:?} must start with '/' or be '*'")]
    RelativePath { index: usize, path: String },

    #[error("route #{index} ({path}): view name is empty")]
    EmptyView { index: usize, path: String },

    #[error("route #{index} ({path}): load_delay_ms is set on a non-lazy route")]
    DelayWithoutLazy { index: usize, path: String },

    #[error("navigation.resolve_timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("navigation.base_url {url:?} is not an absolute URL: {reason}")]
    BaseUrl { url: String, reason: String },
}

/// Validate a parsed config.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, route) in config.routes.iter().enumerate() {
        if !(route.path.starts_with('/') || route.path == "*") {
            errors.push(ValidationError::RelativePath {
                index,
                path: route.path.clone(),
            });
        }
        if route.view.trim().is_empty() {
            errors.push(ValidationError::EmptyView {
                index,
                path: route.path.clone(),
            });
        }
        if !route.lazy && route.load_delay_ms > 0 {
            errors.push(ValidationError::DelayWithoutLazy {
                index,
                path: route.path.clone(),
            });
        }
    }

    if config.navigation.resolve_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Err(e) = Url::parse(&config.navigation.base_url) {
        errors.push(ValidationError::BaseUrl {
            url: config.navigation.base_url.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(path: &str, view: &str) -> RouteConfig {
        RouteConfig {
            path: path.into(),
            view: view.into(),
            lazy: false,
            load_delay_ms: 0,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes.push(route("users/:id", "user"));
        config.routes.push(route("/about", " "));
        config.routes.push(RouteConfig {
            load_delay_ms: 50,
            ..route("/slow", "slow")
        });
        config.navigation.resolve_timeout_ms = Some(0);
        config.navigation.base_url = "/relative".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(matches!(errors[0], ValidationError::RelativePath { index: 0, .. }));
        assert!(matches!(errors[1], ValidationError::EmptyView { index: 1, .. }));
        assert!(matches!(errors[2], ValidationError::DelayWithoutLazy { index: 2, .. }));
        assert_eq!(errors[3], ValidationError::ZeroTimeout);
        assert!(matches!(errors[4], ValidationError::BaseUrl { .. }));
    }

    #[test]
    fn test_catch_all_is_allowed() {
        let mut config = RouterConfig::default();
        config.routes.push(route("*", "not-found"));
        assert!(validate_config(&config).is_ok());
    }
}
