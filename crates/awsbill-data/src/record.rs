//! One row of an AWS Cost and Usage Report.

use std::collections::BTreeMap;

use awsbill_core::error::{BillingError, Result};
use awsbill_core::models::{LineItemType, UsageCategory};
use awsbill_core::regions::normalize_region;
use awsbill_core::time_utils::TimeInterval;
use awsbill_core::usage_type;
use chrono::{DateTime, Utc};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_TIME_INTERVAL: &str = "identity/TimeInterval";
pub const COL_LINE_ITEM_TYPE: &str = "lineItem/LineItemType";
pub const COL_USAGE_TYPE: &str = "lineItem/UsageType";
pub const COL_BLENDED_COST: &str = "lineItem/BlendedCost";
pub const COL_LOCATION: &str = "product/location";

// ── ColumnIndex ───────────────────────────────────────────────────────────────

/// Positions of the columns a [`UsageRecord`] reads, resolved once per header.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    width: usize,
    time_interval: usize,
    line_item_type: usize,
    usage_type: usize,
    blended_cost: usize,
    location: usize,
}

impl ColumnIndex {
    /// Resolve the required columns in a header row.
    ///
    /// Fails with `MalformedRow` when any of them is missing.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref() == name)
                .ok_or_else(|| BillingError::malformed(format!("missing column \"{}\"", name)))
        };

        Ok(Self {
            width: headers.len(),
            time_interval: find(COL_TIME_INTERVAL)?,
            line_item_type: find(COL_LINE_ITEM_TYPE)?,
            usage_type: find(COL_USAGE_TYPE)?,
            blended_cost: find(COL_BLENDED_COST)?,
            location: find(COL_LOCATION)?,
        })
    }

    /// Number of columns in the header this index was built from.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Build a record from a value row aligned with the header.
    pub fn record<S: AsRef<str>>(&self, values: &[S]) -> Result<UsageRecord> {
        if values.len() != self.width {
            return Err(BillingError::malformed(format!(
                "expected {} columns, found {}",
                self.width,
                values.len()
            )));
        }

        let value = |idx: usize| values[idx].as_ref().to_string();

        Ok(UsageRecord {
            line_item_type: value(self.line_item_type),
            usage_type: value(self.usage_type),
            location: value(self.location),
            time_interval: value(self.time_interval),
            blended_cost: value(self.blended_cost),
            tags: BTreeMap::new(),
        })
    }
}

// ── UsageRecord ───────────────────────────────────────────────────────────────

/// A single billing line-item with typed accessors.
///
/// Values are kept as they appear in the report and parsed on access, so a
/// row that is filtered out never has its cost or interval validated.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    line_item_type: String,
    usage_type: String,
    location: String,
    time_interval: String,
    blended_cost: String,
    tags: BTreeMap<String, String>,
}

impl UsageRecord {
    /// Build a record from a header row and a same-length value row.
    pub fn new<H: AsRef<str>, V: AsRef<str>>(headers: &[H], values: &[V]) -> Result<Self> {
        ColumnIndex::from_headers(headers)?.record(values)
    }

    /// Normalized region code, e.g. `"us-east-1"`, or `"noregion"`.
    pub fn region(&self) -> &'static str {
        normalize_region(&self.location)
    }

    /// Length of the billed interval in whole seconds.
    pub fn interval(&self) -> Result<i64> {
        Ok(TimeInterval::parse(&self.time_interval)?.duration_secs())
    }

    /// End of the billed interval; the timestamp metrics are recorded at.
    pub fn end_time(&self) -> Result<DateTime<Utc>> {
        Ok(TimeInterval::parse(&self.time_interval)?.end)
    }

    pub fn usage_type(&self) -> UsageCategory {
        usage_type::usage_category(&self.usage_type)
    }

    pub fn instance_type(&self) -> Option<String> {
        usage_type::instance_type(&self.usage_type)
    }

    /// Blended cost of the line-item.
    pub fn amount(&self) -> Result<f64> {
        let raw = self.blended_cost.trim();
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(BillingError::malformed(format!(
                "blended cost \"{}\" is not a number",
                self.blended_cost
            ))),
        }
    }

    /// Resource tags attached to the line-item. Always empty for now.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// The raw `lineItem/LineItemType` value.
    pub fn line_item_type(&self) -> &str {
        &self.line_item_type
    }

    pub fn kind(&self) -> LineItemType {
        match self.line_item_type.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }

    /// The raw `lineItem/UsageType` value.
    pub fn usage_type_raw(&self) -> &str {
        &self.usage_type
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
