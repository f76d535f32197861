//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at construction):
//!     Route[] (template + view descriptor)
//!     → pattern.rs (template → anchored regex + param names)
//!     → table.rs (ordered, immutable RouteTable)
//!
//! Lookup (per navigation):
//!     path
//!     → matcher.rs (first pattern that accepts the path)
//!     → Return: RouteMatch { route, params } or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable afterwards
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order, not specificity)

pub mod matcher;
pub mod pattern;
pub mod route;
pub mod table;

pub use matcher::{match_route, RouteMatch};
pub use pattern::{Params, Pattern};
pub use route::{Route, ViewDescriptor, ViewError, ViewFuture, ViewProducer};
pub use table::{CompiledRoute, RouteTable};
