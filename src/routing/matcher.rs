//! Route matching logic.
//!
//! # Responsibilities
//! - Scan compiled routes in declaration order
//! - Return the first route whose pattern accepts the path, with its params
//! - Return an explicit no-match otherwise
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - First match wins regardless of specificity
//! - No-match is a value, not an error; callers stay where they are

use std::sync::Arc;

use crate::routing::pattern::Params;
use crate::routing::table::{CompiledRoute, RouteTable};

/// A matched route with its extracted parameters.
#[derive(Debug)]
pub struct RouteMatch<V> {
    pub route: Arc<CompiledRoute<V>>,
    pub params: Params,
}

impl<V> Clone for RouteMatch<V> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
        }
    }
}

/// Find the first route in `table` accepting `path`.
pub fn match_route<V>(table: &RouteTable<V>, path: &str) -> Option<RouteMatch<V>> {
    let route = table.routes().iter().find(|r| r.pattern().is_match(path))?;
    let params = route.pattern().extract(path).unwrap_or_default();
    tracing::trace!(path, template = route.path(), "Route matched");
    Some(RouteMatch {
        route: Arc::clone(route),
        params,
    })
}

impl<V> RouteTable<V> {
    /// Convenience wrapper over [`match_route`].
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<V>> {
        match_route(self, path)
    }
}
