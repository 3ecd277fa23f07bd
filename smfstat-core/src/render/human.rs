use std::io::Write;

use crate::aggregate::{AggregateReport, aggregate};
use crate::anomaly::WarningKind;
use crate::error::{Error, Result};
use crate::model::{RunConfig, STATUS_OK, WorkerResult};

/// Prints the per-worker lines and run totals, then fails if the run was bad.
///
/// Empty input is rejected before anything is written. Quality failures are
/// only reported once the whole report is out, so the numbers that caused
/// them are visible.
pub fn render_human<W: Write + ?Sized>(
    results: &[WorkerResult],
    cfg: &RunConfig,
    out: &mut W,
) -> Result<()> {
    let report = aggregate(results, cfg)?;
    write_report(results, &report, cfg, out)?;
    out.flush()?;
    verdict(&report, cfg)
}

pub fn write_report<W: Write + ?Sized>(
    results: &[WorkerResult],
    report: &AggregateReport,
    cfg: &RunConfig,
    out: &mut W,
) -> Result<()> {
    for w in results {
        writeln!(
            out,
            "host = {},thr = {},elapsed = {:.6},files = {},records = {},status = {}",
            w.host,
            w.thread,
            w.elapsed_seconds,
            w.files,
            w.records,
            worker_status(w)
        )?;
    }

    writeln!(out, "total threads = {}", report.worker_count)?;
    writeln!(out, "total files = {}", report.files_done)?;
    if let Some(gb) = report.data_size_gb {
        writeln!(out, "total data = {gb:9.3} GB")?;
    }

    if cfg.is_multi_host() && report.warnings.get(WarningKind::MissingThreads).is_some() {
        writeln!(out, "WARNING: failed to get some responses from remote hosts")?;
    }

    writeln!(
        out,
        "{:6.2}% of requested files processed, minimum is {:6.2}",
        report.pct_files_completed, cfg.min_completion_pct
    )?;

    if let Some(rates) = &report.rates {
        writeln!(out, "{:.6} sec elapsed time", report.max_elapsed_seconds)?;
        writeln!(out, "{:.6} files/sec", rates.files_per_sec)?;
        if let Some(io) = &rates.io {
            writeln!(out, "{:.6} IOPS", io.iops)?;
            writeln!(out, "{:.6} MB/sec", io.mib_per_sec)?;
        }
    }

    Ok(())
}

/// Turns the run-quality anomalies the human path treats as fatal into errors.
pub fn verdict(report: &AggregateReport, cfg: &RunConfig) -> Result<()> {
    if report.any_failed {
        return Err(Error::ThreadFailures);
    }
    if report.pct_files_completed < cfg.min_completion_pct {
        return Err(Error::NotEnoughFilesDone {
            pct: report.pct_files_completed,
            min_pct: cfg.min_completion_pct,
        });
    }
    Ok(())
}

fn worker_status(w: &WorkerResult) -> String {
    match w.status_message() {
        Some(msg) => format!("ERR: {msg}"),
        None => STATUS_OK.to_string(),
    }
}
