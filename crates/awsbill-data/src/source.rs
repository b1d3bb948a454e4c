//! Where billing reports come from.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use awsbill_core::error::{BillingError, Result};
use tracing::debug;

const FILE_SCHEME: &str = "file://";
const S3_SCHEME: &str = "s3://";

/// A billing-report location parsed from an `AWSBILL_REPORT_PATH` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// `file://<path>`: a report on the local filesystem.
    LocalFile(PathBuf),
    /// `s3://<bucket>/<key>`: a report in S3. Fetching is not implemented.
    ObjectStorage { bucket: String, key: String },
}

impl ReportSource {
    pub fn parse(descriptor: &str) -> Result<Self> {
        if let Some(path) = descriptor.strip_prefix(FILE_SCHEME) {
            if path.is_empty() {
                return Err(BillingError::Configuration(format!(
                    "report path \"{}\" names no file",
                    descriptor
                )));
            }
            return Ok(ReportSource::LocalFile(PathBuf::from(path)));
        }

        if let Some(location) = descriptor.strip_prefix(S3_SCHEME) {
            return match location.split_once('/') {
                Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                    Ok(ReportSource::ObjectStorage {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    })
                }
                _ => Err(BillingError::Configuration(format!(
                    "report path \"{}\" must look like s3://<bucket>/<key>",
                    descriptor
                ))),
            };
        }

        Err(BillingError::Configuration(format!(
            "report path \"{}\" must start with 'file://' or 's3://'",
            descriptor
        )))
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            ReportSource::LocalFile(_) => "file",
            ReportSource::ObjectStorage { .. } => "s3",
        }
    }

    /// Open the report for reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            ReportSource::LocalFile(path) => {
                debug!("Opening billing report {}", path.display());
                let file = File::open(path).map_err(|source| BillingError::FileRead {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            ReportSource::ObjectStorage { bucket, key } => Err(BillingError::UnsupportedScheme {
                scheme: self.scheme().to_string(),
                descriptor: format!("{}{}/{}", S3_SCHEME, bucket, key),
            }),
        }
    }
}

impl FromStr for ReportSource {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
