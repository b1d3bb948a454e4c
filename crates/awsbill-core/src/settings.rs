use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{BillingError, Result};

// ── Settings (CLI + environment) ───────────────────────────────────────────────

/// Convert hourly AWS billing reports into Graphite metrics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "awsbill2graphite",
    about = "Convert hourly AWS billing reports into Graphite metrics",
    version
)]
pub struct Settings {
    /// Billing report location: file://<path> or s3://<bucket>/<key>
    #[arg(long, env = "AWSBILL_REPORT_PATH")]
    pub report_path: Option<String>,

    /// Metrics destination: "stdout" or an http(s):// Graphite URL
    #[arg(long, env = "AWSBILL_GRAPHITE_URL")]
    pub graphite_url: Option<String>,

    /// Extra leading segment for every metric name
    #[arg(long, env = "AWSBILL_METRIC_PREFIX")]
    pub metric_prefix: Option<String>,

    /// Logging level
    #[arg(
        long,
        env = "AWSBILL_LOG_LEVEL",
        default_value = "WARNING",
        ignore_case = true,
        value_parser = ["TRACE", "DEBUG", "INFO", "WARNING", "WARN", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse settings from the process arguments and environment.
    ///
    /// `--help` and `--version` print and exit; any other parse failure is
    /// returned as a `Configuration` error.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`load`](Self::load) but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = match Settings::try_parse_from(args) {
            Ok(settings) => settings,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => return Err(configuration_error(&err)),
            },
        };
        settings.apply_debug_flag();
        Ok(settings)
    }

    /// The input-source descriptor; missing or blank is a configuration error.
    pub fn report_path(&self) -> Result<&str> {
        required(self.report_path.as_deref(), "AWSBILL_REPORT_PATH")
    }

    /// The output descriptor; missing or blank is a configuration error.
    pub fn graphite_url(&self) -> Result<&str> {
        required(self.graphite_url.as_deref(), "AWSBILL_GRAPHITE_URL")
    }

    /// The metric prefix, `None` when unset or empty.
    pub fn metric_prefix(&self) -> Option<&str> {
        self.metric_prefix.as_deref().filter(|p| !p.is_empty())
    }

    // --debug overrides log level.
    fn apply_debug_flag(&mut self) {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
    }
}

// First line of clap's report, without its own "error: " lead.
fn configuration_error(err: &clap::Error) -> BillingError {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .trim();
    BillingError::Configuration(message.to_string())
}

fn required<'a>(value: Option<&'a str>, env_name: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BillingError::Configuration(format!(
            "{} (or --{}) must be set",
            env_name,
            env_name
                .trim_start_matches("AWSBILL_")
                .to_lowercase()
                .replace('_', "-")
        ))),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
