use std::collections::BTreeMap;

use crate::anomaly::{self, Warnings};
use crate::error::{Error, Result};
use crate::model::{BYTES_PER_KB, KB_PER_GB, RunConfig, WorkerResult};

/// Runs that finished faster than this get no rate figures.
pub const MIN_RATE_ELAPSED_SECS: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadStats {
    pub elapsed_seconds: f64,
    pub files: u64,
    pub records: u64,
    pub status: i32,
    /// Platform message for a nonzero status.
    pub status_message: Option<String>,
}

impl ThreadStats {
    fn from_worker(w: &WorkerResult) -> Self {
        Self {
            elapsed_seconds: w.elapsed_seconds,
            files: w.files,
            records: w.records,
            status: w.status,
            status_message: w.status_message(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostStats {
    pub files_done: u64,
    pub records_done: u64,
    pub max_elapsed_seconds: f64,
    pub threads: BTreeMap<String, ThreadStats>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IoRates {
    pub iops: f64,
    /// Decimal megabytes (1000 KB).
    pub mb_per_sec: f64,
    /// Binary megabytes (1024 KB).
    pub mib_per_sec: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub files_per_sec: f64,
    /// Present only when at least one record was transferred.
    pub io: Option<IoRates>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub hosts: BTreeMap<String, HostStats>,
    pub worker_count: u64,

    pub files_done: u64,
    pub records_done: u64,
    pub max_elapsed_seconds: f64,

    pub effective_record_size_kb: u64,
    pub data_size_gb: Option<f64>,
    pub rates: Option<Rates>,

    pub pct_files_completed: f64,
    pub missing_thread_count: u64,
    pub any_failed: bool,

    pub warnings: Warnings,
}

/// Record size used for volume and bandwidth figures.
///
/// An unset record size means whole-file I/O, and no worker can move more
/// than its biggest buffer in a single request.
#[must_use]
pub fn effective_record_size_kb(cfg: &RunConfig) -> u64 {
    let rszkb = if cfg.record_size_kb == 0 {
        cfg.total_size_kb
    } else {
        cfg.record_size_kb
    };

    if rszkb.saturating_mul(BYTES_PER_KB) > cfg.biggest_buffer_bytes {
        cfg.biggest_buffer_bytes / BYTES_PER_KB
    } else {
        rszkb
    }
}

pub fn aggregate(results: &[WorkerResult], cfg: &RunConfig) -> Result<AggregateReport> {
    if results.is_empty() {
        return Err(Error::NoResults);
    }
    if cfg.iterations == 0 {
        return Err(Error::ZeroIterations);
    }

    let totals = results.iter().fold(Totals::default(), Totals::absorb);

    let rszkb = effective_record_size_kb(cfg);
    let data_size_gb = (totals.records_done > 0)
        .then(|| (totals.records_done as f64) * (rszkb as f64) / (KB_PER_GB as f64));
    let rates = compute_rates(
        totals.files_done,
        totals.records_done,
        totals.max_elapsed_seconds,
        rszkb,
    );

    let worker_count = results.len() as u64;
    let max_files = cfg.iterations.saturating_mul(worker_count);
    let pct_files_completed = 100.0 * (totals.files_done as f64) / (max_files as f64);
    let missing_thread_count = cfg.expected_workers().saturating_sub(worker_count);

    let mut report = AggregateReport {
        hosts: totals.hosts,
        worker_count,
        files_done: totals.files_done,
        records_done: totals.records_done,
        max_elapsed_seconds: totals.max_elapsed_seconds,
        effective_record_size_kb: rszkb,
        data_size_gb,
        rates,
        pct_files_completed,
        missing_thread_count,
        any_failed: totals.any_failed,
        warnings: Warnings::default(),
    };
    report.warnings = anomaly::detect(&report, cfg);

    tracing::debug!(
        workers = report.worker_count,
        hosts = report.hosts.len(),
        files = report.files_done,
        records = report.records_done,
        elapsed = report.max_elapsed_seconds,
        record_size_kb = rszkb,
        "aggregated worker results"
    );

    Ok(report)
}

fn compute_rates(files: u64, records: u64, elapsed: f64, rszkb: u64) -> Option<Rates> {
    if elapsed <= MIN_RATE_ELAPSED_SECS {
        return None;
    }

    let io = (records > 0).then(|| {
        let iops = (records as f64) / elapsed;
        IoRates {
            iops,
            mb_per_sec: iops * (rszkb as f64) / 1000.0,
            mib_per_sec: iops * (rszkb as f64) / 1024.0,
        }
    });

    Some(Rates {
        files_per_sec: (files as f64) / elapsed,
        io,
    })
}

#[derive(Default)]
struct Totals {
    hosts: BTreeMap<String, HostStats>,
    files_done: u64,
    records_done: u64,
    max_elapsed_seconds: f64,
    any_failed: bool,
}

impl Totals {
    fn absorb(mut self, w: &WorkerResult) -> Self {
        let host = self.hosts.entry(w.host.clone()).or_default();
        host.files_done = host.files_done.saturating_add(w.files);
        host.records_done = host.records_done.saturating_add(w.records);
        host.max_elapsed_seconds = host.max_elapsed_seconds.max(w.elapsed_seconds);
        host.threads.insert(w.thread.clone(), ThreadStats::from_worker(w));

        self.files_done = self.files_done.saturating_add(w.files);
        self.records_done = self.records_done.saturating_add(w.records);
        self.max_elapsed_seconds = self.max_elapsed_seconds.max(w.elapsed_seconds);
        self.any_failed |= w.failed();
        self
    }
}
