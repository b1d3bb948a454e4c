//! Metric rules: which records feed which time series.

use awsbill_core::models::UsageCategory;

use crate::record::UsageRecord;

/// Name of the metric that sums every aggregated cost.
pub const TOTAL_COST_METRIC: &str = "all-regions.all-types.total-cost";

/// Describes one family of time series generated from the billing data.
pub trait MetricRule {
    /// Short identifier used in log output.
    fn id(&self) -> &'static str;

    /// Whether `record` contributes to a series of this family.
    fn matches(&self, record: &UsageRecord) -> bool;

    /// Name of the series `record`'s amount is added to.
    ///
    /// Only meaningful after [`matches`](Self::matches) returned `true`.
    fn metric_name(&self, record: &UsageRecord) -> String;
}

/// Per-EC2-instance-type cost: `<region>.ec2-instance.<instance-type>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByInstanceType;

impl MetricRule for ByInstanceType {
    fn id(&self) -> &'static str {
        "by-instance-type"
    }

    fn matches(&self, record: &UsageRecord) -> bool {
        record.usage_type() == UsageCategory::Ec2Instance
            && record.instance_type().is_some()
            && record.tags().is_empty()
    }

    fn metric_name(&self, record: &UsageRecord) -> String {
        format!(
            "{}.{}.{}",
            record.region(),
            record.usage_type(),
            record.instance_type().unwrap_or_default()
        )
    }
}

/// Sum of all hourly costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCosts;

impl MetricRule for AllCosts {
    fn id(&self) -> &'static str {
        "all-costs"
    }

    fn matches(&self, _record: &UsageRecord) -> bool {
        true
    }

    fn metric_name(&self, _record: &UsageRecord) -> String {
        TOTAL_COST_METRIC.to_string()
    }
}

/// The rule set used by the pipeline, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn MetricRule>> {
    vec![Box::new(ByInstanceType), Box::new(AllCosts)]
}
