//! Rendering of metric points in the Graphite plaintext line protocol.

use crate::models::MetricPoint;

/// Renders `(metric, timestamp, value)` triples as Graphite plaintext lines:
/// `<name> <value> <timestamp>\n`.
#[derive(Debug, Clone, Default)]
pub struct MetricFormatter {
    prefix: Option<String>,
}

impl MetricFormatter {
    /// Create a formatter that prepends `prefix` as an extra leading
    /// dot-segment. `None` or an empty string means no prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use awsbill_core::formatting::MetricFormatter;
    ///
    /// let plain = MetricFormatter::new(None);
    /// assert_eq!(plain.format("a.b", 1488330000, 0.85), "a.b 0.8500 1488330000\n");
    ///
    /// let prefixed = MetricFormatter::new(Some("billing"));
    /// assert_eq!(prefixed.format("a.b", 1488330000, 2.0), "billing.a.b 2.0000 1488330000\n");
    /// ```
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Format one line, including the trailing newline.
    pub fn format(&self, metric_name: &str, timestamp: i64, value: f64) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}.{} {:.4} {}\n", prefix, metric_name, value, timestamp),
            None => format!("{} {:.4} {}\n", metric_name, value, timestamp),
        }
    }

    pub fn format_point(&self, point: &MetricPoint) -> String {
        self.format(&point.name, point.timestamp, point.value)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
