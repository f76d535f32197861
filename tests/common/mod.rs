//! Shared fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lekko::{MemoryHistory, NavState, Route, Router, ViewError};
use tokio::sync::Notify;

pub type View = &'static str;

/// In-memory history opened at `path` on a fixed origin.
pub fn history_at(path: &str) -> Arc<MemoryHistory> {
    let url = url::Url::parse("http://app.test/").unwrap().join(path).unwrap();
    Arc::new(MemoryHistory::new(url))
}

/// A lazy view that only resolves once its gate is opened.
#[derive(Clone, Default)]
pub struct Gate {
    notify: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one pending (or the next) load finish.
    pub fn open(&self) {
        self.notify.notify_one();
    }

    /// How many times the producer was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn route(&self, path: &str, view: View) -> Route<View> {
        let gate = self.clone();
        Route::lazy(path, move || {
            let gate = gate.clone();
            async move {
                gate.calls.fetch_add(1, Ordering::SeqCst);
                gate.notify.notified().await;
                Ok(view)
            }
        })
    }
}

/// A lazy view whose producer always fails.
#[allow(dead_code)]
pub fn failing_route(path: &str, reason: &'static str) -> Route<View> {
    Route::lazy(path, move || async move { Err(ViewError::Load(reason.to_string())) })
}

/// Wait until the router displays `view`.
#[allow(dead_code)]
pub async fn wait_for_page(router: &Router<View>, view: View) {
    let mut rx = router.subscribe();
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let current = rx.borrow_and_update().clone();
            if current.is_some_and(|active| active.view == view) {
                return;
            }
            rx.changed().await.expect("router dropped");
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for page {view:?}"));
}

/// Yield until the router reaches `state`.
#[allow(dead_code)]
pub async fn wait_for_state(router: &Router<View>, state: NavState) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while router.state() != state {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {state:?}"));
}
