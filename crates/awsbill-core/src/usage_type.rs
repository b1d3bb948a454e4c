//! Classification of the `lineItem/UsageType` column.
//!
//! AWS encodes usage types inconsistently. Some examples:
//!
//! ```text
//! USE1-USW2-AWS-In-Bytes
//! Requests-RBP
//! Request
//! APN1-DataProcessing-Bytes
//! APN1-BoxUsage:c3.2xlarge
//! BoxUsage:m1.small
//! ```
//!
//! A leading four-character region code is stripped heuristically, then the
//! remainder is matched against the known prefixes. Only `BoxUsage:` (EC2
//! instance-hours) is recognised.

use crate::models::{NormalizedUsage, UsageCategory};

const BOX_USAGE_PREFIX: &str = "BoxUsage:";

/// Two-letter geography prefixes that start AWS region codes like `USE1`.
const REGION_CODE_GEOGRAPHIES: [&str; 4] = ["US", "EU", "AP", "SA"];

/// Classify a raw usage-type string into category and instance type.
///
/// # Examples
///
/// ```
/// use awsbill_core::models::UsageCategory;
/// use awsbill_core::usage_type::classify;
///
/// let usage = classify("APN1-BoxUsage:c3.2xlarge");
/// assert_eq!(usage.category, UsageCategory::Ec2Instance);
/// assert_eq!(usage.instance_type.as_deref(), Some("c3-2xlarge"));
/// ```
pub fn classify(raw: &str) -> NormalizedUsage {
    NormalizedUsage {
        category: usage_category(raw),
        instance_type: instance_type(raw),
    }
}

/// Determine the usage category of a raw usage-type string.
pub fn usage_category(raw: &str) -> UsageCategory {
    let mut segments = raw.split('-').peekable();

    if segments.peek().is_some_and(|first| is_region_code(first)) {
        segments.next();
    }

    match segments.next() {
        Some(segment) if segment.starts_with(BOX_USAGE_PREFIX) => UsageCategory::Ec2Instance,
        _ => UsageCategory::Unknown,
    }
}

/// Extract the EC2 instance type, with `.` replaced by `-` so that it can be
/// used as a single metric-name segment.
///
/// Returns `None` unless the string contains `BoxUsage:`.
pub fn instance_type(raw: &str) -> Option<String> {
    if !raw.contains(BOX_USAGE_PREFIX) {
        return None;
    }
    let (_, rest) = raw.split_once(':')?;
    Some(rest.replace('.', "-"))
}

/// Whether `segment` looks like a region code such as `USE1`, `APN1` or `EUC1`.
///
/// Four characters, a known geography prefix, all cased characters uppercase,
/// and a digit in the last position.
fn is_region_code(segment: &str) -> bool {
    let chars: Vec<char> = segment.chars().collect();
    if chars.len() != 4 {
        return false;
    }

    let geography: String = chars[..2].iter().collect();
    if !REGION_CODE_GEOGRAPHIES.contains(&geography.as_str()) {
        return false;
    }

    let all_upper = !chars.iter().any(|c| c.is_lowercase());
    all_upper && chars[3].is_ascii_digit()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
