//! Client-side route matching and navigation core.
//!
//! Matches browser paths against declared templates (`/users/:id`,
//! `/files/*`), resolves the matched view (immediately or lazily), and keeps
//! the history stack, visible URL and displayed route in lock-step.

pub mod config;
pub mod navigation;
pub mod observability;
pub mod router;
pub mod routing;

pub use config::{NavigationConfig, RouterConfig};
pub use navigation::{
    ActiveRoute, History, LinkActivation, LinkDisposition, ListenerHandle, MemoryHistory, NavState,
    NavigationError, NavigationOutcome,
};
pub use router::Router;
pub use routing::{Params, Pattern, Route, RouteTable, ViewDescriptor, ViewError};
