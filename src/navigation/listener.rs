//! Background listener for back/forward and link events.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use url::Url;

use crate::navigation::controller::{NavigationMode, Navigator};
use crate::navigation::links::{classify, LinkActivation, LinkDisposition};

/// Handle to a running listener. Dropping it stops the listener.
#[derive(Debug)]
pub struct ListenerHandle {
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    /// Signal the listener to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(());
    }

    /// Stop the listener and wait for it to exit.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run a navigation in its own task so a later event can supersede it.
pub(crate) fn spawn_navigation<V>(navigator: Arc<Navigator<V>>, url: Url, mode: NavigationMode)
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = navigator.request(url, mode).await {
            tracing::warn!(error = %e, mode = mode.as_str(), "Background navigation failed");
        }
    });
}

/// Route a link activation: intercept same-origin links, ignore the rest.
pub(crate) fn handle_link<V>(navigator: &Arc<Navigator<V>>, href: &str) -> LinkDisposition
where
    V: Clone + Send + Sync + 'static,
{
    let disposition = classify(&navigator.history().location(), href);
    match &disposition {
        LinkDisposition::Intercepted(url) => {
            spawn_navigation(Arc::clone(navigator), url.clone(), NavigationMode::Push);
        }
        LinkDisposition::PassThrough => {
            tracing::debug!(href, "Link left to default handling");
        }
    }
    disposition
}

/// Start servicing history traversals and link activations.
pub(crate) fn spawn<V>(
    navigator: Arc<Navigator<V>>,
    mut links: mpsc::UnboundedReceiver<LinkActivation>,
) -> ListenerHandle
where
    V: Clone + Send + Sync + 'static,
{
    let mut pops = navigator.history().subscribe();
    let (shutdown, mut shutdown_rx) = broadcast::channel(1);

    let task = tokio::spawn(async move {
        tracing::debug!("Navigation listener started");
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Navigation listener received shutdown signal");
                    break;
                }
                pop = pops.recv() => match pop {
                    Ok(event) => {
                        spawn_navigation(Arc::clone(&navigator), event.url, NavigationMode::Traverse);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Only the latest position matters.
                        tracing::warn!(skipped, "Missed history events, resynchronizing");
                        let url = navigator.history().location();
                        spawn_navigation(Arc::clone(&navigator), url, NavigationMode::Traverse);
                    }
                    Err(RecvError::Closed) => break,
                },
                Some(link) = links.recv() => {
                    handle_link(&navigator, &link.href);
                }
                else => break,
            }
        }
        tracing::debug!("Navigation listener stopped");
    });

    ListenerHandle {
        shutdown,
        task: Some(task),
    }
}
