//! Route declarations and view descriptors.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use thiserror::Error;

/// Errors produced while resolving a lazy view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The producer reported a failure.
    #[error("view failed to load: {0}")]
    Load(String),

    /// The producer did not finish before the resolve deadline.
    #[error("view did not load within {0:?}")]
    Timeout(Duration),
}

/// Future returned by a lazy view producer.
pub type ViewFuture<V> = BoxFuture<'static, Result<V, ViewError>>;

/// Zero-argument producer that loads a view asynchronously.
pub type ViewProducer<V> = Arc<dyn Fn() -> ViewFuture<V> + Send + Sync>;

/// How a route's view becomes available.
pub enum ViewDescriptor<V> {
    /// The view is ready to display.
    Immediate(V),
    /// The view is produced on demand, e.g. loaded from a split bundle.
    Lazy(ViewProducer<V>),
}

impl<V> ViewDescriptor<V> {
    /// Wrap a view that is already available.
    pub fn immediate(view: V) -> Self {
        Self::Immediate(view)
    }

    /// Wrap an async producer.
    pub fn lazy<F, Fut>(producer: F) -> Self
    where
        V: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, ViewError>> + Send + 'static,
    {
        Self::Lazy(Arc::new(move || -> ViewFuture<V> { Box::pin(producer()) }))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl<V: Clone> ViewDescriptor<V> {
    /// Produce the view, awaiting the producer for lazy descriptors.
    ///
    /// `deadline` bounds how long a lazy producer may run.
    pub async fn resolve(&self, deadline: Option<Duration>) -> Result<V, ViewError> {
        match self {
            Self::Immediate(view) => Ok(view.clone()),
            Self::Lazy(producer) => {
                let fut = producer();
                match deadline {
                    Some(limit) => tokio::time::timeout(limit, fut)
                        .await
                        .map_err(|_| ViewError::Timeout(limit))?,
                    None => fut.await,
                }
            }
        }
    }
}

impl<V: Clone> Clone for ViewDescriptor<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Immediate(view) => Self::Immediate(view.clone()),
            Self::Lazy(producer) => Self::Lazy(Arc::clone(producer)),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ViewDescriptor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(view) => f.debug_tuple("Immediate").field(view).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// A route declaration: a path template and the view it displays.
#[derive(Debug, Clone)]
pub struct Route<V> {
    /// Path template, e.g. `/users/:id`.
    pub path: String,
    pub view: ViewDescriptor<V>,
}

impl<V> Route<V> {
    /// Declare a route whose view is immediately available.
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            view: ViewDescriptor::immediate(view),
        }
    }

    /// Declare a route whose view is loaded on first navigation.
    pub fn lazy<F, Fut>(path: impl Into<String>, producer: F) -> Self
    where
        V: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, ViewError>> + Send + 'static,
    {
        Self {
            path: path.into(),
            view: ViewDescriptor::lazy(producer),
        }
    }
}
