use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::aggregate::{AggregateReport, HostStats, ThreadStats, aggregate};
use crate::anomaly::Warnings;
use crate::error::Result;
use crate::model::{RunConfig, STATUS_OK, WorkerResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredReport {
    pub hosts: BTreeMap<String, StructuredHost>,
    pub files: u64,
    pub records: u64,
    pub elapsed: f64,
    pub warnings: Warnings,

    #[serde(rename = "data-size-GB", skip_serializing_if = "Option::is_none")]
    pub data_size_gb: Option<f64>,

    #[serde(rename = "files-per-sec", skip_serializing_if = "Option::is_none")]
    pub files_per_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<f64>,
    #[serde(rename = "MB-per-sec", skip_serializing_if = "Option::is_none")]
    pub mb_per_sec: Option<f64>,

    #[serde(rename = "pct-files-processed")]
    pub pct_files_processed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredHost {
    pub threads: BTreeMap<String, StructuredThread>,
    pub files: u64,
    pub records: u64,
    pub elapsed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredThread {
    /// `ok`, or the platform message for the worker's error code.
    pub status: String,
    pub elapsed: f64,
    pub files: u64,
    pub records: u64,
}

/// Builds the machine-readable report. Anomalies end up in `warnings`; the
/// only failure is input that cannot be aggregated at all.
pub fn render_structured(results: &[WorkerResult], cfg: &RunConfig) -> Result<StructuredReport> {
    let report = aggregate(results, cfg)?;
    Ok(build_document(&report))
}

#[must_use]
pub fn build_document(report: &AggregateReport) -> StructuredReport {
    let hosts = report
        .hosts
        .iter()
        .map(|(name, h)| (name.clone(), build_host(h)))
        .collect();

    let files_per_sec = report.rates.map(|r| r.files_per_sec);
    let io = report.rates.and_then(|r| r.io);

    StructuredReport {
        hosts,
        files: report.files_done,
        records: report.records_done,
        elapsed: report.max_elapsed_seconds,
        warnings: report.warnings.clone(),
        data_size_gb: report.data_size_gb,
        files_per_sec,
        iops: io.map(|io| io.iops),
        mb_per_sec: io.map(|io| io.mb_per_sec),
        pct_files_processed: report.pct_files_completed,
    }
}

fn build_host(h: &HostStats) -> StructuredHost {
    StructuredHost {
        threads: h
            .threads
            .iter()
            .map(|(tid, t)| (tid.clone(), build_thread(t)))
            .collect(),
        files: h.files_done,
        records: h.records_done,
        elapsed: h.max_elapsed_seconds,
    }
}

fn build_thread(t: &ThreadStats) -> StructuredThread {
    StructuredThread {
        status: t
            .status_message
            .clone()
            .unwrap_or_else(|| STATUS_OK.to_string()),
        elapsed: t.elapsed_seconds,
        files: t.files,
        records: t.records,
    }
}

impl StructuredReport {
    /// Writes the document as JSON indented by four spaces.
    pub fn write_json_pretty<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut *out, fmt);
        self.serialize(&mut ser)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json_pretty(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
