//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! goto / replace / initial load / link / back-forward
//!     → controller.rs (already displayed? match? resolve view)
//!     → history.rs (push, replace, or nothing on traversal)
//!     → active.rs (publish new ActiveRoute snapshot)
//!
//! Events:
//!     History::subscribe() ─┐
//!     LinkActivation mpsc ──┴→ listener.rs → controller.rs
//! ```
//!
//! # Design Decisions
//! - Single writer: only the controller mutates history or the Active Route
//! - Last navigation to start resolving wins
//! - History and UI events are injected, never read from globals

pub mod active;
pub mod controller;
pub mod history;
pub mod links;
pub mod listener;

pub use active::{ActiveRoute, ActiveRouteCell, Snapshot};
pub use controller::{NavState, NavigationError, NavigationMode, NavigationOutcome, Navigator};
pub use history::{History, HistoryEntry, MemoryHistory, PopEvent};
pub use links::{LinkActivation, LinkDisposition};
pub use listener::ListenerHandle;
