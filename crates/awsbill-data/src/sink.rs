//! Where formatted metric lines go.

use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use awsbill_core::error::{BillingError, Result};

/// A metrics destination parsed from an `AWSBILL_GRAPHITE_URL` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricSink {
    /// `stdout`: write lines to standard output.
    Stdout,
    /// `http://…` or `https://…`: push to a Graphite endpoint. Not implemented.
    Graphite(String),
}

impl MetricSink {
    pub fn parse(descriptor: &str) -> Result<Self> {
        if descriptor == "stdout" {
            return Ok(MetricSink::Stdout);
        }
        if descriptor.starts_with("http://") || descriptor.starts_with("https://") {
            return Ok(MetricSink::Graphite(descriptor.to_string()));
        }
        Err(BillingError::Configuration(format!(
            "graphite URL \"{}\" must be an HTTP or HTTPS URL, or 'stdout'",
            descriptor
        )))
    }

    /// Open the destination for writing. Callers must flush when done.
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            MetricSink::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
            MetricSink::Graphite(url) => Err(BillingError::UnsupportedScheme {
                scheme: url.split("://").next().unwrap_or("http").to_string(),
                descriptor: url.clone(),
            }),
        }
    }
}

impl FromStr for MetricSink {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
