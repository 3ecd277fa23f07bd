use std::collections::BTreeSet;

use serde::Deserialize;

pub const BYTES_PER_KB: u64 = 1024;
pub const KB_PER_GB: u64 = 1 << 20;

/// Outcome of one worker thread, as collected from the host that ran it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkerResult {
    pub host: String,
    pub thread: String,
    pub elapsed_seconds: f64,
    pub files: u64,
    pub records: u64,

    /// 0 on success, otherwise an OS error code.
    #[serde(default)]
    pub status: i32,
}

impl WorkerResult {
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status != 0
    }

    /// Platform message for a nonzero status.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        self.failed().then(|| os_error_message(self.status))
    }
}

/// Status text for a worker that finished cleanly.
pub const STATUS_OK: &str = "ok";

/// `strerror`-style text for an OS error code.
#[must_use]
pub fn os_error_message(code: i32) -> String {
    let msg = std::io::Error::from_raw_os_error(code).to_string();
    let decoration = format!(" (os error {code})");
    match msg.strip_suffix(&decoration) {
        Some(plain) => plain.to_string(),
        None => msg,
    }
}

/// Parameters of the run the results belong to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RunConfig {
    /// 0 means the whole file is one record.
    pub record_size_kb: u64,
    pub total_size_kb: u64,
    pub biggest_buffer_bytes: u64,

    /// Empty for a single-host run.
    pub requested_hosts: BTreeSet<String>,
    pub requested_thread_count: u64,

    /// Files each worker was asked to process.
    pub iterations: u64,
    pub min_completion_pct: f64,
    pub json_output_requested: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            record_size_kb: 0,
            total_size_kb: 64,
            biggest_buffer_bytes: 1024 * BYTES_PER_KB,
            requested_hosts: BTreeSet::new(),
            requested_thread_count: 2,
            iterations: 200,
            min_completion_pct: 90.0,
            json_output_requested: false,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn is_multi_host(&self) -> bool {
        !self.requested_hosts.is_empty()
    }

    /// Number of workers that should have reported back.
    #[must_use]
    pub fn expected_workers(&self) -> u64 {
        if self.is_multi_host() {
            (self.requested_hosts.len() as u64).saturating_mul(self.requested_thread_count)
        } else {
            self.requested_thread_count
        }
    }
}
