//! Configuration schema definitions.
//!
//! This module defines the configuration structure for a route table file.
//! All types derive Serde traits for deserialization from TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route declarations, in match order.
    pub routes: Vec<RouteConfig>,

    /// Navigation behavior.
    pub navigation: NavigationConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// A route declared in a config file.
///
/// Views are referenced by name; the embedding application maps names to
/// its own view type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path template, e.g. `/users/:id`.
    pub path: String,

    /// View name to display.
    pub view: String,

    /// Load the view lazily on first navigation.
    #[serde(default)]
    pub lazy: bool,

    /// Simulated load latency for lazy views, in milliseconds.
    #[serde(default)]
    pub load_delay_ms: u64,
}

/// Navigation behavior.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Initial URL when the router runs on in-memory history.
    pub base_url: String,

    /// Deadline for lazy views, in milliseconds. Unset means no deadline.
    pub resolve_timeout_ms: Option<u64>,
}

impl NavigationConfig {
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            resolve_timeout_ms: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_timeout_round_trip() {
        let config = NavigationConfig::default().with_resolve_timeout(Duration::from_millis(1500));
        assert_eq!(config.resolve_timeout_ms, Some(1500));
        assert_eq!(config.resolve_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(NavigationConfig::default().resolve_timeout(), None);
    }

    #[test]
    fn test_resolve_timeout_saturates() {
        let config = NavigationConfig::default().with_resolve_timeout(Duration::MAX);
        assert_eq!(config.resolve_timeout_ms, Some(u64::MAX));
    }
}
