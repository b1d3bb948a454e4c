//! Data layer for awsbill2graphite.
//!
//! Turns billing CSV rows into [`record::UsageRecord`]s, matches them against
//! metric rules, accumulates per-hour totals and runs the end-to-end
//! pipeline. Report sources and metric sinks live here as well.

pub mod aggregator;
pub mod pipeline;
pub mod record;
pub mod rules;
pub mod sink;
pub mod source;

pub use awsbill_core as core;
pub use pipeline::{generate_metrics, RunSummary};
