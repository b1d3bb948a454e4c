//! Core types for awsbill2graphite.
//!
//! Errors, settings, the usage-type classifier, the region table, timestamp
//! parsing and the Graphite line formatter. Nothing in here performs I/O.

pub mod error;
pub mod formatting;
pub mod models;
pub mod regions;
pub mod settings;
pub mod time_utils;
pub mod usage_type;

pub use error::{BillingError, Result};
