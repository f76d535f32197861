//! Public router facade.
//!
//! Ties the compiled route table, the navigator and the event listener
//! together behind the small surface an application uses.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::NavigationConfig;
use crate::navigation::{
    listener, History, LinkActivation, LinkDisposition, ListenerHandle, NavState, NavigationError,
    NavigationMode, NavigationOutcome, Navigator, Snapshot,
};
use crate::routing::{Params, Route, RouteMatch, RouteTable};

/// Client-side router over views of type `V`.
///
/// Cloning is cheap; clones share the same navigator.
///
/// ```ignore
/// let history = Arc::new(MemoryHistory::parse("http://localhost/")?);
/// let (links_tx, links_rx) = mpsc::unbounded_channel();
/// let (router, _listener) = Router::mount(
///     vec![Route::new("/", Page::Home), Route::new("/users/:id", Page::User)],
///     history,
///     &NavigationConfig::default(),
///     links_rx,
/// )
/// .await?;
/// router.goto("/users/42").await?;
/// ```
pub struct Router<V> {
    navigator: Arc<Navigator<V>>,
}

impl<V> Clone for Router<V> {
    fn clone(&self) -> Self {
        Self {
            navigator: Arc::clone(&self.navigator),
        }
    }
}

impl<V> Router<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Compile `routes` without navigating yet.
    pub fn new(routes: Vec<Route<V>>, history: Arc<dyn History>, config: &NavigationConfig) -> Self {
        let table = Arc::new(RouteTable::build(routes));
        tracing::info!(routes = table.len(), "Route table compiled");
        Self {
            navigator: Arc::new(Navigator::new(table, history, config)),
        }
    }

    /// Compile `routes`, adopt the current URL and start listening for events.
    pub async fn mount(
        routes: Vec<Route<V>>,
        history: Arc<dyn History>,
        config: &NavigationConfig,
        links: mpsc::UnboundedReceiver<LinkActivation>,
    ) -> Result<(Self, ListenerHandle), NavigationError> {
        let router = Self::new(routes, history, config);
        let handle = router.start(links).await?;
        Ok((router, handle))
    }

    /// Start the listener, then display the route for the current URL.
    ///
    /// The initial navigation overwrites the current history entry instead
    /// of adding one.
    pub async fn start(
        &self,
        links: mpsc::UnboundedReceiver<LinkActivation>,
    ) -> Result<ListenerHandle, NavigationError> {
        let handle = listener::spawn(Arc::clone(&self.navigator), links);
        let outcome = self.navigator.adopt_location().await?;
        tracing::info!(outcome = outcome.as_str(), "Router started");
        Ok(handle)
    }

    /// Navigate to `path`, adding a history entry.
    pub async fn goto(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        self.navigator.goto(path).await
    }

    /// Navigate to `path`, overwriting the current history entry.
    pub async fn replace(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        self.navigator.replace(path).await
    }

    /// Display the route for the URL already in the address bar, overwriting
    /// the current history entry.
    pub async fn adopt_location(&self) -> Result<NavigationOutcome, NavigationError> {
        self.navigator.adopt_location().await
    }

    /// Resynchronize the Active Route after the history cursor moved.
    ///
    /// For hosts that deliver back/forward events themselves instead of
    /// through [`History::subscribe`]. History is not written.
    pub async fn sync_with_history(&self) -> Result<NavigationOutcome, NavigationError> {
        let url = self.navigator.history().location();
        self.navigator.request(url, NavigationMode::Traverse).await
    }

    /// Handle a link activation reported by the UI.
    ///
    /// When this returns [`LinkDisposition::Intercepted`] the caller must
    /// prevent the default page load; the navigation runs in the background.
    pub fn intercept_link(&self, href: &str) -> LinkDisposition {
        listener::handle_link(&self.navigator, href)
    }

    /// The route declarations as supplied.
    pub fn routes(&self) -> &[Route<V>] {
        self.navigator.table().declarations()
    }

    /// Params of the displayed route, or an empty map before the first commit.
    pub fn params(&self) -> Params {
        self.navigator
            .active()
            .map(|active| active.params.clone())
            .unwrap_or_default()
    }

    /// The displayed view, if any route has been committed.
    pub fn page(&self) -> Option<V> {
        self.navigator.active().map(|active| active.view.clone())
    }

    /// Current Active Route snapshot.
    pub fn active(&self) -> Snapshot<V> {
        self.navigator.active()
    }

    /// Observe Active Route replacements.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<V>> {
        self.navigator.subscribe()
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    /// Match `path` against the table without navigating.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<V>> {
        self.navigator.table().match_path(path)
    }

    pub fn history(&self) -> &Arc<dyn History> {
        self.navigator.history()
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        self.navigator.table()
    }
}
