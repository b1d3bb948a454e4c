mod bootstrap;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use awsbill_core::formatting::MetricFormatter;
use awsbill_core::settings::Settings;
use awsbill_data::pipeline::{generate_metrics, RunSummary};
use awsbill_data::sink::MetricSink;
use awsbill_data::source::ReportSource;

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&settings) {
        Ok(summary) => {
            tracing::info!(
                "Wrote {} metric lines from {} billing rows",
                summary.lines_written,
                summary.rows_read
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<RunSummary> {
    tracing::info!("awsbill2graphite v{} starting", env!("CARGO_PKG_VERSION"));

    let report_path = settings.report_path()?;
    let source = ReportSource::parse(report_path)?;
    let sink = MetricSink::parse(settings.graphite_url()?)?;

    let input = source
        .open()
        .with_context(|| format!("cannot open billing report {report_path}"))?;
    let mut output = sink.open()?;

    let formatter = MetricFormatter::new(settings.metric_prefix());
    let summary = generate_metrics(input, &mut output, &formatter)?;
    output.flush().context("cannot flush metric output")?;

    Ok(summary)
}
