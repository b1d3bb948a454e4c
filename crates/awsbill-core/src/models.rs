use std::fmt;
use std::str::FromStr;

/// The `lineItem/LineItemType` column of a billing row.
///
/// Only `Usage` rows feed the metrics; everything else is filtered out by the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemType {
    /// Metered usage of a resource.
    Usage,
    /// Tax charged on top of usage.
    Tax,
    /// Any other line-item type (credits, refunds, fees, ...), kept verbatim.
    Other(String),
}

impl LineItemType {
    /// The value as it appears in the report.
    pub fn as_str(&self) -> &str {
        match self {
            LineItemType::Usage => "Usage",
            LineItemType::Tax => "Tax",
            LineItemType::Other(raw) => raw,
        }
    }
}

impl FromStr for LineItemType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Usage" => LineItemType::Usage,
            "Tax" => LineItemType::Tax,
            other => LineItemType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for LineItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized usage category derived from the free-form usage-type string.
///
/// Only EC2 instance-hours are recognised at the moment; every other usage
/// type (EBS, data transfer, ELB, RDS, ...) lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageCategory {
    Ec2Instance,
    Unknown,
}

impl UsageCategory {
    /// The metric-name segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageCategory::Ec2Instance => "ec2-instance",
            UsageCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a usage-type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUsage {
    pub category: UsageCategory,
    /// Instance type with `.` replaced by `-`, e.g. `"c3-2xlarge"`.
    pub instance_type: Option<String>,
}

/// One aggregated output value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    /// Dot-delimited metric name, without the configured prefix.
    pub name: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_type_parse_known() {
        assert_eq!("Usage".parse::<LineItemType>().unwrap(), LineItemType::Usage);
        assert_eq!("Tax".parse::<LineItemType>().unwrap(), LineItemType::Tax);
    }

    #[test]
    fn test_line_item_type_parse_other_keeps_raw() {
        let parsed: LineItemType = "Credit".parse().unwrap();
        assert_eq!(parsed, LineItemType::Other("Credit".to_string()));
        assert_eq!(parsed.as_str(), "Credit");
    }

    #[test]
    fn test_line_item_type_is_case_sensitive() {
        let parsed: LineItemType = "usage".parse().unwrap();
        assert_ne!(parsed, LineItemType::Usage);
    }

    #[test]
    fn test_usage_category_display() {
        assert_eq!(UsageCategory::Ec2Instance.to_string(), "ec2-instance");
        assert_eq!(UsageCategory::Unknown.to_string(), "unknown");
    }
}
