//! Compiled route storage.
//!
//! # Responsibilities
//! - Compile route declarations once, at construction
//! - Preserve declaration order exactly
//! - Keep the original declarations for read-back
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - No deduplication or conflict detection between overlapping templates
//! - No reordering by specificity; first declared wins

use std::sync::Arc;

use crate::routing::pattern::Pattern;
use crate::routing::route::{Route, ViewDescriptor};

/// A route declaration paired with its compiled pattern.
#[derive(Debug)]
pub struct CompiledRoute<V> {
    /// Position in the table (declaration order).
    index: usize,
    path: String,
    view: ViewDescriptor<V>,
    pattern: Pattern,
}

impl<V> CompiledRoute<V> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The template this route was declared with.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn view(&self) -> &ViewDescriptor<V> {
        &self.view
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn param_names(&self) -> &[String] {
        self.pattern.param_names()
    }
}

/// Ordered, immutable set of compiled routes.
#[derive(Debug)]
pub struct RouteTable<V> {
    declarations: Vec<Route<V>>,
    compiled: Vec<Arc<CompiledRoute<V>>>,
}

impl<V: Clone> RouteTable<V> {
    /// Compile every declaration, keeping their order.
    pub fn build(declarations: Vec<Route<V>>) -> Self {
        let compiled = declarations
            .iter()
            .enumerate()
            .map(|(index, route)| {
                let pattern = Pattern::compile(&route.path);
                tracing::debug!(
                    index,
                    template = %route.path,
                    regex = pattern.as_regex(),
                    lazy = route.view.is_lazy(),
                    "Compiled route"
                );
                Arc::new(CompiledRoute {
                    index,
                    path: route.path.clone(),
                    view: route.view.clone(),
                    pattern,
                })
            })
            .collect();

        Self {
            declarations,
            compiled,
        }
    }
}

impl<V> RouteTable<V> {
    /// The declarations exactly as supplied.
    pub fn declarations(&self) -> &[Route<V>] {
        &self.declarations
    }

    /// Compiled routes in declaration order.
    pub fn routes(&self) -> &[Arc<CompiledRoute<V>>] {
        &self.compiled
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Returns true if `route` is one of this table's entries.
    pub fn contains(&self, route: &Arc<CompiledRoute<V>>) -> bool {
        self.compiled
            .get(route.index)
            .is_some_and(|entry| Arc::ptr_eq(entry, route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let table = RouteTable::build(vec![
            Route::new("/", "home"),
            Route::new("/about", "about"),
            Route::new("/about", "duplicate"),
        ]);

        assert_eq!(table.len(), 3);
        let paths: Vec<_> = table.routes().iter().map(|r| r.path()).collect();
        assert_eq!(paths, ["/", "/about", "/about"]);
        for (i, route) in table.routes().iter().enumerate() {
            assert_eq!(route.index(), i);
            assert!(table.contains(route));
        }
    }

    #[test]
    fn test_declarations_unmodified() {
        let table = RouteTable::build(vec![Route::new("users/:id/", "user")]);
        assert_eq!(table.declarations()[0].path, "users/:id/");
        assert_eq!(table.routes()[0].param_names(), ["id"]);
    }

    #[test]
    fn test_foreign_route_not_contained() {
        let a = RouteTable::build(vec![Route::new("/", "home")]);
        let b = RouteTable::build(vec![Route::new("/", "home")]);
        assert!(!a.contains(&b.routes()[0]));
    }

    #[test]
    fn test_empty_table() {
        let table: RouteTable<&str> = RouteTable::build(Vec::new());
        assert!(table.is_empty());
    }
}
