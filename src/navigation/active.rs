//! The currently displayed route and its observers.
//!
//! # Responsibilities
//! - Hold the single Active Route snapshot
//! - Publish replacements to every subscriber at once
//!
//! # Design Decisions
//! - Snapshots are immutable `Arc`s; a commit swaps the whole value, so
//!   params and view are always read together
//! - Built on `tokio::sync::watch`: readers see the latest value, and
//!   subscribers are woken on each publish

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use url::Url;

use crate::routing::{CompiledRoute, Params};

/// A committed navigation: matched route, params and resolved view.
pub struct ActiveRoute<V> {
    pub route: Arc<CompiledRoute<V>>,
    pub params: Params,
    pub view: V,
    /// URL committed to history for this route.
    pub url: Url,
}

impl<V: fmt::Debug> fmt::Debug for ActiveRoute<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveRoute")
            .field("template", &self.route.path())
            .field("params", &self.params)
            .field("view", &self.view)
            .field("url", &self.url.as_str())
            .finish()
    }
}

/// What observers receive: `None` until the first commit.
pub type Snapshot<V> = Option<Arc<ActiveRoute<V>>>;

/// Single-writer publisher for the Active Route.
pub struct ActiveRouteCell<V> {
    tx: watch::Sender<Snapshot<V>>,
}

impl<V> ActiveRouteCell<V> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// The current snapshot.
    pub fn get(&self) -> Snapshot<V> {
        self.tx.borrow().clone()
    }

    /// Replace the snapshot and wake subscribers.
    pub(crate) fn publish(&self, active: ActiveRoute<V>) -> Arc<ActiveRoute<V>> {
        let active = Arc::new(active);
        self.tx.send_replace(Some(Arc::clone(&active)));
        active
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<V>> {
        self.tx.subscribe()
    }
}

impl<V> Default for ActiveRouteCell<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Route, RouteTable};

    #[tokio::test]
    async fn test_publish_notifies_subscribers() {
        let table = RouteTable::build(vec![Route::new("/users/:id", "user")]);
        let cell = ActiveRouteCell::new();
        let mut rx = cell.subscribe();
        assert!(cell.get().is_none());

        let m = table.match_path("/users/7").unwrap();
        cell.publish(ActiveRoute {
            route: m.route,
            params: m.params,
            view: "user",
            url: Url::parse("http://app.test/users/7").unwrap(),
        });

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone().unwrap();
        assert_eq!(snapshot.view, "user");
        assert_eq!(snapshot.params.get("id").map(String::as_str), Some("7"));
        assert!(table.contains(&snapshot.route));
    }
}
