//! Navigation state machine.
//!
//! # States
//! - Idle: no navigation in flight
//! - Resolving: a matched navigation is waiting for its view
//!
//! # State Transitions
//! ```text
//! Idle → Idle:      target already displayed, or no route matched
//! Idle → Resolving: route matched
//! Resolving → Idle: commit (history write + publish), failure, or superseded
//! ```
//!
//! # Design Decisions
//! - The navigator is the only writer of history and of the Active Route
//! - Last request to start resolving wins; older resolutions are dropped
//!   when they finish
//! - A failed view leaves the Active Route and the URL untouched
//! - Back/forward resynchronizes the Active Route without writing history

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde_json::json;
use thiserror::Error;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::config::NavigationConfig;
use crate::navigation::active::{ActiveRoute, ActiveRouteCell, Snapshot};
use crate::navigation::history::History;
use crate::observability::metrics;
use crate::routing::{RouteMatch, RouteTable, ViewError};

/// How a navigation updates the history stack on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Add a new entry (`goto`, intercepted links).
    Push,
    /// Overwrite the current entry (`replace`, initial load).
    Replace,
    /// The browser already moved the cursor (back/forward); leave history alone.
    Traverse,
}

impl NavigationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationMode::Push => "push",
            NavigationMode::Replace => "replace",
            NavigationMode::Traverse => "traverse",
        }
    }
}

/// Navigator state as seen by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Resolving,
}

/// How a navigation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// History and Active Route were updated.
    Committed,
    /// The target is already the displayed route at the visible URL.
    AlreadyDisplayed,
    /// No route accepts the target; nothing changed.
    NoMatch,
    /// A later navigation started before this one finished resolving.
    Superseded,
}

impl NavigationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationOutcome::Committed => "committed",
            NavigationOutcome::AlreadyDisplayed => "already_displayed",
            NavigationOutcome::NoMatch => "no_match",
            NavigationOutcome::Superseded => "superseded",
        }
    }
}

/// Errors surfaced by a navigation request.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The target could not be resolved against the current URL.
    #[error("invalid navigation target {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    /// The target resolves to a different origin than the current URL.
    #[error("navigation target {target:?} leaves origin {origin}")]
    CrossOrigin { target: String, origin: String },

    /// The matched route's view could not be produced.
    #[error("failed to resolve view for {path}: {source}")]
    ViewResolution {
        path: String,
        #[source]
        source: ViewError,
    },
}

#[derive(Debug, Default)]
struct Control {
    /// Bumped each time a navigation starts resolving.
    generation: u64,
    /// Generation currently resolving, if any.
    resolving: Option<u64>,
}

/// Sequences URL changes, view resolution and history updates.
pub struct Navigator<V> {
    table: Arc<RouteTable<V>>,
    history: Arc<dyn History>,
    active: ActiveRouteCell<V>,
    control: Mutex<Control>,
    resolve_timeout: Option<Duration>,
}

impl<V> Navigator<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(
        table: Arc<RouteTable<V>>,
        history: Arc<dyn History>,
        config: &NavigationConfig,
    ) -> Self {
        Self {
            table,
            history,
            active: ActiveRouteCell::new(),
            control: Mutex::new(Control::default()),
            resolve_timeout: config.resolve_timeout(),
        }
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        &self.table
    }

    pub fn history(&self) -> &Arc<dyn History> {
        &self.history
    }

    /// Current Active Route snapshot.
    pub fn active(&self) -> Snapshot<V> {
        self.active.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Snapshot<V>> {
        self.active.subscribe()
    }

    pub fn state(&self) -> NavState {
        if self.lock_control().resolving.is_some() {
            NavState::Resolving
        } else {
            NavState::Idle
        }
    }

    /// Navigate to `target`, adding a history entry.
    ///
    /// Only the path is compared with the displayed route: a target that
    /// differs from the current URL in query or fragment alone is
    /// `AlreadyDisplayed` and is not written to history.
    pub async fn goto(&self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        let url = self.resolve_target(target)?;
        self.request(url, NavigationMode::Push).await
    }

    /// Navigate to `target`, overwriting the current history entry.
    ///
    /// Same path comparison as [`Navigator::goto`].
    pub async fn replace(&self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        let url = self.resolve_target(target)?;
        self.request(url, NavigationMode::Replace).await
    }

    /// Display the route for the URL already in the address bar.
    pub async fn adopt_location(&self) -> Result<NavigationOutcome, NavigationError> {
        let url = self.history.location();
        self.request(url, NavigationMode::Replace).await
    }

    /// Resolve `target` relative to the current URL.
    ///
    /// The result must stay on the current origin.
    pub fn resolve_target(&self, target: &str) -> Result<Url, NavigationError> {
        let location = self.history.location();
        let url = location.join(target).map_err(|source| {
            metrics::record_navigation_failure("invalid_target");
            NavigationError::InvalidTarget {
                target: target.to_string(),
                source,
            }
        })?;

        if url.origin() != location.origin() {
            metrics::record_navigation_failure("cross_origin");
            tracing::warn!(requested = target, "Refusing to navigate to another origin");
            return Err(NavigationError::CrossOrigin {
                target: target.to_string(),
                origin: location.origin().ascii_serialization(),
            });
        }
        Ok(url)
    }

    /// Run one navigation request to completion.
    pub async fn request(
        &self,
        url: Url,
        mode: NavigationMode,
    ) -> Result<NavigationOutcome, NavigationError> {
        let span = tracing::info_span!(
            "navigation",
            id = %Uuid::new_v4(),
            target = %url.path(),
            mode = mode.as_str(),
        );
        let result = self.navigate(url, mode).instrument(span).await;
        match &result {
            Ok(outcome) => metrics::record_navigation(outcome.as_str()),
            Err(_) => metrics::record_navigation_failure("view_resolution"),
        }
        result
    }

    async fn navigate(
        &self,
        url: Url,
        mode: NavigationMode,
    ) -> Result<NavigationOutcome, NavigationError> {
        let path = url.path().to_string();

        if self.is_displayed(&path, mode) {
            tracing::debug!("Target already displayed");
            return Ok(NavigationOutcome::AlreadyDisplayed);
        }

        let Some(matched) = self.table.match_path(&path) else {
            tracing::debug!("No route matched, staying on current page");
            return Ok(NavigationOutcome::NoMatch);
        };

        let pending = self.begin();
        let generation = pending.generation;
        let lazy = matched.route.view().is_lazy();
        tracing::debug!(template = matched.route.path(), lazy, generation, "Route matched");

        let started = Instant::now();
        let view = match matched.route.view().resolve(self.resolve_timeout).await {
            Ok(view) => view,
            Err(source) => return self.abandon(generation, path, source),
        };
        if lazy {
            metrics::record_view_resolution(started.elapsed());
        }

        Ok(self.commit(generation, url, mode, matched, view))
    }

    /// True when `path` is both the visible URL and the displayed route.
    fn is_displayed(&self, path: &str, mode: NavigationMode) -> bool {
        let displayed = self.active.get().is_some_and(|a| a.url.path() == path);
        // On traversal the browser has already moved the address bar.
        let visible = mode == NavigationMode::Traverse || self.history.location().path() == path;
        displayed && visible
    }

    fn begin(&self) -> PendingGuard<'_> {
        let mut control = self.lock_control();
        control.generation += 1;
        control.resolving = Some(control.generation);
        PendingGuard {
            control: &self.control,
            generation: control.generation,
        }
    }

    fn abandon(
        &self,
        generation: u64,
        path: String,
        source: ViewError,
    ) -> Result<NavigationOutcome, NavigationError> {
        let mut control = self.lock_control();
        if control.generation != generation {
            tracing::debug!(error = %source, "Superseded navigation failed to resolve");
            return Ok(NavigationOutcome::Superseded);
        }
        control.resolving = None;
        tracing::warn!(error = %source, "View resolution failed, keeping current page");
        Err(NavigationError::ViewResolution { path, source })
    }

    fn commit(
        &self,
        generation: u64,
        url: Url,
        mode: NavigationMode,
        matched: RouteMatch<V>,
        view: V,
    ) -> NavigationOutcome {
        // Held across the history write and publish so readers never see one
        // without the other.
        let mut control = self.lock_control();
        if control.generation != generation {
            tracing::debug!(latest = control.generation, "Navigation superseded, discarding");
            return NavigationOutcome::Superseded;
        }
        control.resolving = None;

        let state = json!({
            "route": matched.route.path(),
            "params": &matched.params,
        });
        match mode {
            NavigationMode::Push => self.history.push(&url, state),
            NavigationMode::Replace => self.history.replace(&url, state),
            NavigationMode::Traverse => {}
        }

        tracing::info!(
            template = matched.route.path(),
            url = %url,
            "Navigation committed"
        );
        self.active.publish(ActiveRoute {
            route: matched.route,
            params: matched.params,
            view,
            url,
        });
        NavigationOutcome::Committed
    }

    fn lock_control(&self) -> MutexGuard<'_, Control> {
        lock(&self.control)
    }
}

fn lock(control: &Mutex<Control>) -> MutexGuard<'_, Control> {
    control.lock().unwrap_or_else(|e| e.into_inner())
}

/// Marks a navigation as resolving until it commits, fails or is dropped.
///
/// A request future dropped mid-resolution (timeout, `select!`, aborted
/// task) must not leave the navigator stuck in `Resolving`.
struct PendingGuard<'a> {
    control: &'a Mutex<Control>,
    generation: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut control = lock(self.control);
        if control.resolving == Some(self.generation) {
            control.resolving = None;
        }
    }
}
