//! Navigation metrics.
//!
//! # Metrics
//! - `lekko_navigations_total` (counter): finished navigations by outcome
//! - `lekko_navigation_failures_total` (counter): failed navigations by reason
//! - `lekko_view_resolution_seconds` (histogram): lazy view load time
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Labels are static strings to keep cardinality bounded

use std::time::Duration;

pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("lekko_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_navigation_failure(reason: &'static str) {
    metrics::counter!("lekko_navigation_failures_total", "reason" => reason).increment(1);
}

pub fn record_view_resolution(elapsed: Duration) {
    metrics::histogram!("lekko_view_resolution_seconds").record(elapsed.as_secs_f64());
}
