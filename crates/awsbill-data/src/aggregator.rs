//! Accumulation of record costs into per-metric, per-timestamp totals.

use std::collections::BTreeMap;
use std::io::Write;

use awsbill_core::error::Result;
use awsbill_core::formatting::MetricFormatter;
use awsbill_core::models::MetricPoint;
use tracing::trace;

use crate::record::UsageRecord;
use crate::rules::MetricRule;

// ── MetricLedger ──────────────────────────────────────────────────────────────

/// Processes [`UsageRecord`]s and builds time series from them.
///
/// Series are keyed by metric name, points within a series by Unix
/// timestamp. Both levels are ordered so that output is deterministic.
pub struct MetricLedger {
    rules: Vec<Box<dyn MetricRule>>,
    timeseries: BTreeMap<String, BTreeMap<i64, f64>>,
}

impl MetricLedger {
    /// Create an empty ledger evaluating `rules` in order.
    pub fn new(rules: Vec<Box<dyn MetricRule>>) -> Self {
        Self {
            rules,
            timeseries: BTreeMap::new(),
        }
    }

    /// Add the record's amount to every series whose rule matches it.
    ///
    /// Cost and end time are only parsed when at least one rule matches.
    pub fn process(&mut self, record: &UsageRecord) -> Result<()> {
        let names: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(record))
            .map(|rule| {
                trace!("Rule {} matched usage type \"{}\"", rule.id(), record.usage_type_raw());
                rule.metric_name(record)
            })
            .collect();

        if names.is_empty() {
            trace!("No rule matched usage type \"{}\"", record.usage_type_raw());
            return Ok(());
        }

        let amount = record.amount()?;
        let timestamp = record.end_time()?.timestamp();

        for name in names {
            *self
                .timeseries
                .entry(name)
                .or_default()
                .entry(timestamp)
                .or_insert(0.0) += amount;
        }

        Ok(())
    }

    /// All accumulated points, sorted by metric name then timestamp.
    pub fn points(&self) -> impl Iterator<Item = MetricPoint> + '_ {
        self.timeseries.iter().flat_map(|(name, series)| {
            series.iter().map(move |(&timestamp, &value)| MetricPoint {
                name: name.clone(),
                timestamp,
                value,
            })
        })
    }

    /// Value accumulated for one `(metric, timestamp)` pair, if any.
    pub fn value(&self, metric_name: &str, timestamp: i64) -> Option<f64> {
        self.timeseries.get(metric_name)?.get(&timestamp).copied()
    }

    /// Number of distinct `(metric, timestamp)` pairs.
    pub fn len(&self) -> usize {
        self.timeseries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.timeseries.is_empty()
    }

    /// Write one formatted line per point to `out`. Returns the line count.
    pub fn output<W: Write + ?Sized>(
        &self,
        formatter: &MetricFormatter,
        out: &mut W,
    ) -> Result<usize> {
        let mut written = 0;
        for point in self.points() {
            out.write_all(formatter.format_point(&point).as_bytes())?;
            written += 1;
        }
        Ok(written)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        COL_BLENDED_COST, COL_LINE_ITEM_TYPE, COL_LOCATION, COL_TIME_INTERVAL, COL_USAGE_TYPE,
    };
    use crate::rules::{default_rules, AllCosts, TOTAL_COST_METRIC};
    use awsbill_core::error::BillingError;

    const HOUR_1: &str = "2017-03-01T00:00:00Z/2017-03-01T01:00:00Z";
    const HOUR_2: &str = "2017-03-01T01:00:00Z/2017-03-01T02:00:00Z";
    // 2017-03-01T01:00:00Z and 2017-03-01T02:00:00Z
    const TS_1: i64 = 1_488_330_000;
    const TS_2: i64 = 1_488_333_600;

    fn make_record(interval: &str, usage_type: &str, cost: &str, location: &str) -> UsageRecord {
        let headers = [
            COL_TIME_INTERVAL,
            COL_LINE_ITEM_TYPE,
            COL_USAGE_TYPE,
            COL_BLENDED_COST,
            COL_LOCATION,
        ];
        let values = [interval, "Usage", usage_type, cost, location];
        UsageRecord::new(&headers, &values).unwrap()
    }

    // ── process ───────────────────────────────────────────────────────────────

    #[test]
    fn test_box_usage_feeds_two_series() {
        let mut ledger = MetricLedger::new(default_rules());
        let record = make_record(HOUR_1, "BoxUsage:m1.small", "0.85", "US East (N. Virginia)");
        ledger.process(&record).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.value("us-east-1.ec2-instance.m1-small", TS_1), Some(0.85));
        assert_eq!(ledger.value(TOTAL_COST_METRIC, TS_1), Some(0.85));
    }

    #[test]
    fn test_same_metric_same_hour_sums() {
        let mut ledger = MetricLedger::new(default_rules());
        for cost in ["1.25", "0.75"] {
            let record = make_record(HOUR_1, "USW2-BoxUsage:c3.2xlarge", cost, "US West (Oregon)");
            ledger.process(&record).unwrap();
        }

        assert_eq!(ledger.len(), 2);
        let value = ledger
            .value("us-west-2.ec2-instance.c3-2xlarge", TS_1)
            .unwrap();
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_different_hours_stay_separate() {
        let mut ledger = MetricLedger::new(vec![Box::new(AllCosts)]);
        ledger.process(&make_record(HOUR_1, "", "1", "")).unwrap();
        ledger.process(&make_record(HOUR_2, "", "2", "")).unwrap();

        assert_eq!(ledger.value(TOTAL_COST_METRIC, TS_1), Some(1.0));
        assert_eq!(ledger.value(TOTAL_COST_METRIC, TS_2), Some(2.0));
    }

    #[test]
    fn test_unclassified_usage_only_feeds_total() {
        let mut ledger = MetricLedger::new(default_rules());
        let record = make_record(HOUR_1, "USE1-USW2-AWS-In-Bytes", "0.1", "US East (N. Virginia)");
        ledger.process(&record).unwrap();

        let names: Vec<String> = ledger.points().map(|p| p.name).collect();
        assert_eq!(names, vec![TOTAL_COST_METRIC.to_string()]);
    }

    #[test]
    fn test_no_matching_rule_skips_cost_parsing() {
        let mut ledger = MetricLedger::new(Vec::new());
        ledger.process(&make_record(HOUR_1, "", "not-a-number", "")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_bad_cost_propagates() {
        let mut ledger = MetricLedger::new(default_rules());
        let err = ledger
            .process(&make_record(HOUR_1, "BoxUsage:m1.small", "n/a", ""))
            .unwrap_err();
        assert!(matches!(err, BillingError::MalformedRow { .. }));
        assert!(ledger.is_empty());
    }

    // ── output ────────────────────────────────────────────────────────────────

    #[test]
    fn test_output_is_sorted_and_formatted() {
        let mut ledger = MetricLedger::new(default_rules());
        ledger
            .process(&make_record(HOUR_2, "BoxUsage:t2.micro", "0.5", "EU (Ireland)"))
            .unwrap();
        ledger
            .process(&make_record(HOUR_1, "BoxUsage:t2.micro", "0.25", "EU (Ireland)"))
            .unwrap();

        let mut buf: Vec<u8> = Vec::new();
        let written = ledger.output(&MetricFormatter::new(None), &mut buf).unwrap();
        assert_eq!(written, 4);

        let text = String::from_utf8(buf).unwrap();
        let expected = format!(
            "all-regions.all-types.total-cost 0.2500 {TS_1}\n\
             all-regions.all-types.total-cost 0.5000 {TS_2}\n\
             eu-west-1.ec2-instance.t2-micro 0.2500 {TS_1}\n\
             eu-west-1.ec2-instance.t2-micro 0.5000 {TS_2}\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_output_renders_points_with_prefix() {
        let mut ledger = MetricLedger::new(default_rules());
        ledger
            .process(&make_record(HOUR_1, "BoxUsage:m1.small", "0.85", "US East (N. Virginia)"))
            .unwrap();

        let formatter = MetricFormatter::new(Some("aws"));
        let mut buf: Vec<u8> = Vec::new();
        assert_eq!(ledger.output(&formatter, &mut buf).unwrap(), ledger.len());

        let expected: String = ledger.points().map(|p| formatter.format_point(&p)).collect();
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
        assert_eq!(
            expected,
            format!(
                "aws.all-regions.all-types.total-cost 0.8500 {TS_1}\n\
                 aws.us-east-1.ec2-instance.m1-small 0.8500 {TS_1}\n"
            )
        );
    }

    #[test]
    fn test_output_empty_ledger_writes_nothing() {
        let ledger = MetricLedger::new(default_rules());
        let mut buf: Vec<u8> = Vec::new();
        assert_eq!(ledger.output(&MetricFormatter::new(Some("x")), &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
