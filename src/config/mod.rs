//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → routes become Route declarations; navigation/logging sections
//!       configure the navigator and the subscriber
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is never hot-swapped
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, LoggingConfig, NavigationConfig, RouteConfig, RouterConfig};
pub use validation::ValidationError;
