//! Aggregation and reporting of per-worker results from a distributed
//! small-file benchmark run.
//!
//! Results arrive already collected from every host; this crate folds them
//! into per-host and global totals, derives rates, flags suspicious runs, and
//! renders either an operator-facing text report or a JSON document.

mod aggregate;
mod anomaly;
mod error;
mod model;
mod render;

pub use aggregate::{
    AggregateReport, HostStats, IoRates, MIN_RATE_ELAPSED_SECS, Rates, ThreadStats, aggregate,
    effective_record_size_kb,
};
pub use anomaly::{Warning, WarningKind, Warnings, detect};
pub use error::{Error, Result};
pub use model::{BYTES_PER_KB, KB_PER_GB, RunConfig, STATUS_OK, WorkerResult, os_error_message};
pub use render::{
    StructuredHost, StructuredReport, StructuredThread, build_document, render_human,
    render_structured, verdict, write_report,
};
