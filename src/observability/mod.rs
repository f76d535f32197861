//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! navigation/controller.rs produces:
//!     → tracing spans (one `navigation` span per request, with a UUID id)
//!     → logging.rs (subscriber that formats those events)
//!     → metrics.rs (outcome counters, lazy-load histogram)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (target, mode, template)
//! - Navigation id flows through all events of one request
//! - Metrics are cheap and optional (facade only)

pub mod logging;
pub mod metrics;
