//! Link activation interception.
//!
//! Same-origin links are taken over by the router; everything else is left
//! to the browser's default handling.

use url::Url;

/// A link activation reported by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
    /// Raw `href` of the activated anchor, possibly relative.
    pub href: String,
}

impl LinkActivation {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// What the UI layer should do with an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Prevent the default page load; the router navigates to this URL.
    Intercepted(Url),
    /// Let the browser handle it (cross-origin or unparseable).
    PassThrough,
}

impl LinkDisposition {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, LinkDisposition::Intercepted(_))
    }
}

/// Decide whether `href`, activated on a page at `location`, stays in-app.
pub fn classify(location: &Url, href: &str) -> LinkDisposition {
    match location.join(href) {
        Ok(url) if url.origin() == location.origin() => LinkDisposition::Intercepted(url),
        Ok(_) => LinkDisposition::PassThrough,
        Err(e) => {
            tracing::debug!(href, error = %e, "Unparseable link left to the browser");
            LinkDisposition::PassThrough
        }
    }
}
