//! Browser history abstraction.
//!
//! # Responsibilities
//! - Expose the current URL
//! - Push or replace history entries with an opaque state blob
//! - Notify subscribers when the user moves back or forward
//!
//! # Design Decisions
//! - The router never touches a global; history is injected
//! - `MemoryHistory` follows browser semantics so it can stand in for a
//!   real browser in tests and tools

use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::broadcast;
use url::Url;

/// Emitted after the history cursor moves (back/forward/go).
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
    /// URL the cursor now points at.
    pub url: Url,
    /// State blob stored with that entry.
    pub state: Value,
}

/// URL and history facility the navigator drives.
pub trait History: Send + Sync {
    /// The URL currently shown in the address bar.
    fn location(&self) -> Url;

    /// Add a new entry after the current one.
    fn push(&self, url: &Url, state: Value);

    /// Overwrite the current entry.
    fn replace(&self, url: &Url, state: Value);

    /// Subscribe to back/forward notifications.
    fn subscribe(&self) -> broadcast::Receiver<PopEvent>;
}

/// One history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub url: Url,
    pub state: Value,
}

#[derive(Debug)]
struct Stack {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

/// In-memory history with browser semantics.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    pops: broadcast::Sender<PopEvent>,
}

impl MemoryHistory {
    /// Create a history holding a single entry for `initial`.
    pub fn new(initial: Url) -> Self {
        let (pops, _) = broadcast::channel(16);
        Self {
            stack: Mutex::new(Stack {
                entries: vec![HistoryEntry {
                    url: initial,
                    state: Value::Null,
                }],
                cursor: 0,
            }),
            pops,
        }
    }

    /// Parse `initial` and create a history for it.
    pub fn parse(initial: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(initial)?))
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Index of the current entry.
    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// Snapshot of every entry, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    /// The current entry.
    pub fn current(&self) -> HistoryEntry {
        let stack = self.lock();
        stack.entries[stack.cursor].clone()
    }

    /// Move one entry back. Returns false at the start of the stack.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward. Returns false at the end of the stack.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta` entries and notify subscribers.
    ///
    /// Out-of-range moves are ignored, as browsers do.
    pub fn go(&self, delta: isize) -> bool {
        let event = {
            let mut stack = self.lock();
            let Some(target) = stack.cursor.checked_add_signed(delta) else {
                return false;
            };
            if delta == 0 || target >= stack.entries.len() {
                return false;
            }
            stack.cursor = target;
            let entry = &stack.entries[target];
            PopEvent {
                url: entry.url.clone(),
                state: entry.state.clone(),
            }
        };

        tracing::debug!(url = %event.url, delta, "History traversal");
        // No subscribers is fine.
        let _ = self.pops.send(event);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Stack> {
        // Stack updates cannot panic halfway, so a poisoned lock is still consistent.
        self.stack.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Url {
        self.current().url
    }

    fn push(&self, url: &Url, state: Value) {
        let mut stack = self.lock();
        let keep = stack.cursor + 1;
        stack.entries.truncate(keep);
        stack.entries.push(HistoryEntry {
            url: url.clone(),
            state,
        });
        stack.cursor = keep;
    }

    fn replace(&self, url: &Url, state: Value) {
        let mut stack = self.lock();
        let cursor = stack.cursor;
        stack.entries[cursor] = HistoryEntry {
            url: url.clone(),
            state,
        };
    }

    fn subscribe(&self) -> broadcast::Receiver<PopEvent> {
        self.pops.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(path: &str) -> Url {
        Url::parse("http://app.test/").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_push_and_replace() {
        let history = MemoryHistory::new(url("/"));
        history.push(&url("/a"), json!({"n": 1}));
        history.push(&url("/b"), Value::Null);
        assert_eq!(history.len(), 3);
        assert_eq!(history.location().path(), "/b");

        history.replace(&url("/c"), Value::Null);
        assert_eq!(history.len(), 3);
        assert_eq!(history.location().path(), "/c");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new(url("/"));
        history.push(&url("/a"), Value::Null);
        history.push(&url("/b"), Value::Null);
        assert!(history.back());
        assert!(history.back());
        history.push(&url("/c"), Value::Null);

        let paths: Vec<_> = history.entries().iter().map(|e| e.url.path().to_string()).collect();
        assert_eq!(paths, ["/", "/c"]);
        assert!(!history.forward());
    }

    #[tokio::test]
    async fn test_traversal_notifies_subscribers() {
        let history = MemoryHistory::new(url("/"));
        history.push(&url("/a"), json!({"route": "/a"}));
        let mut pops = history.subscribe();

        assert!(history.back());
        let event = pops.recv().await.unwrap();
        assert_eq!(event.url.path(), "/");
        assert_eq!(event.state, Value::Null);

        assert!(history.forward());
        let event = pops.recv().await.unwrap();
        assert_eq!(event.url.path(), "/a");
        assert_eq!(event.state, json!({"route": "/a"}));
    }

    #[test]
    fn test_out_of_range_go_is_ignored() {
        let history = MemoryHistory::new(url("/"));
        assert!(!history.back());
        assert!(!history.go(5));
        assert!(!history.go(0));
        assert_eq!(history.cursor(), 0);
    }
}
