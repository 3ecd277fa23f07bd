use serde::Serialize;
use serde::ser::SerializeMap as _;

use crate::aggregate::{AggregateReport, MIN_RATE_ELAPSED_SECS};
use crate::model::RunConfig;

/// Warning name (the string form used in structured output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum WarningKind {
    ThreadFailures,
    TooBrief,
    MissingThreads,
    NotEnoughFilesDone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    /// At least one worker exited with a nonzero status.
    ThreadFailures,

    /// The run ended too quickly to compute rates.
    TooBrief { threshold_secs: f64 },

    /// Fewer workers reported than were requested.
    MissingThreads { count: u64 },

    NotEnoughFilesDone { min_pct: f64 },
}

impl Warning {
    #[must_use]
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::ThreadFailures => WarningKind::ThreadFailures,
            Self::TooBrief { .. } => WarningKind::TooBrief,
            Self::MissingThreads { .. } => WarningKind::MissingThreads,
            Self::NotEnoughFilesDone { .. } => WarningKind::NotEnoughFilesDone,
        }
    }
}

/// Warnings raised for a run, at most one per kind, in detection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn push(&mut self, warning: Warning) {
        if self.get(warning.kind()).is_none() {
            self.0.push(warning);
        }
    }

    #[must_use]
    pub fn get(&self, kind: WarningKind) -> Option<&Warning> {
        self.0.iter().find(|w| w.kind() == kind)
    }

    #[must_use]
    pub fn contains(&self, warning: &Warning) -> bool {
        self.0.contains(warning)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.0.iter()
    }
}

// `{ "<kind>": <flag or threshold>, ... }`
impl Serialize for Warnings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for w in &self.0 {
            let key: &'static str = w.kind().into();
            match *w {
                Warning::ThreadFailures => map.serialize_entry(key, &true)?,
                Warning::TooBrief { threshold_secs } => map.serialize_entry(key, &threshold_secs)?,
                Warning::MissingThreads { count } => map.serialize_entry(key, &count)?,
                Warning::NotEnoughFilesDone { min_pct } => map.serialize_entry(key, &min_pct)?,
            }
        }
        map.end()
    }
}

/// Flags run conditions that make the numbers suspect. Never fails.
#[must_use]
pub fn detect(report: &AggregateReport, cfg: &RunConfig) -> Warnings {
    let mut out = Warnings::default();

    if report.any_failed {
        out.push(Warning::ThreadFailures);
    }

    if report.max_elapsed_seconds <= MIN_RATE_ELAPSED_SECS {
        out.push(Warning::TooBrief {
            threshold_secs: MIN_RATE_ELAPSED_SECS,
        });
    }

    if report.missing_thread_count > 0 {
        out.push(Warning::MissingThreads {
            count: report.missing_thread_count,
        });
    }

    if report.pct_files_completed < cfg.min_completion_pct {
        out.push(Warning::NotEnoughFilesDone {
            min_pct: cfg.min_completion_pct,
        });
    }

    for w in out.iter() {
        tracing::warn!(warning = %w.kind(), detail = ?w, "run anomaly detected");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::WorkerResult;

    fn worker(host: &str, thread: &str) -> WorkerResult {
        WorkerResult {
            host: host.to_string(),
            thread: thread.to_string(),
            elapsed_seconds: 1.0,
            files: 10,
            records: 10,
            status: 0,
        }
    }

    fn warnings(results: &[WorkerResult], cfg: &RunConfig) -> Warnings {
        match aggregate(results, cfg) {
            Ok(r) => r.warnings,
            Err(err) => panic!("aggregate failed: {err}"),
        }
    }

    fn clean_cfg() -> RunConfig {
        RunConfig {
            iterations: 10,
            requested_thread_count: 1,
            min_completion_pct: 90.0,
            ..RunConfig::default()
        }
    }

    #[test]
    fn kind_names_are_kebab_case() {
        assert_eq!(WarningKind::NotEnoughFilesDone.to_string(), "not-enough-files-done");
        assert_eq!(WarningKind::MissingThreads.to_string(), "missing-threads");
        let s: &'static str = WarningKind::TooBrief.into();
        assert_eq!(s, "too-brief");
    }

    #[test]
    fn clean_run_has_no_warnings() {
        let w = warnings(&[worker("a", "00")], &clean_cfg());
        assert!(w.is_empty(), "unexpected warnings: {w:?}");
    }

    #[test]
    fn missing_threads_counts_hosts_times_threads() {
        let cfg = RunConfig {
            requested_hosts: ["A", "B"].iter().map(|h| h.to_string()).collect(),
            requested_thread_count: 2,
            ..clean_cfg()
        };
        let w = warnings(
            &[worker("A", "00"), worker("A", "01"), worker("B", "00")],
            &cfg,
        );
        assert_eq!(
            w.get(WarningKind::MissingThreads),
            Some(&Warning::MissingThreads { count: 1 })
        );
    }

    #[test]
    fn single_host_missing_threads_uses_thread_count() {
        let cfg = RunConfig {
            requested_thread_count: 4,
            ..clean_cfg()
        };
        let w = warnings(&[worker("a", "00")], &cfg);
        assert!(w.contains(&Warning::MissingThreads { count: 3 }));
    }

    #[test]
    fn extra_workers_are_not_flagged() {
        let w = warnings(&[worker("a", "00"), worker("a", "01")], &clean_cfg());
        assert!(w.get(WarningKind::MissingThreads).is_none());
    }

    #[test]
    fn pushing_same_kind_twice_keeps_first() {
        let mut w = Warnings::default();
        w.push(Warning::MissingThreads { count: 1 });
        w.push(Warning::MissingThreads { count: 7 });
        assert_eq!(w.len(), 1);
        assert!(w.contains(&Warning::MissingThreads { count: 1 }));
    }

    #[test]
    fn serializes_as_named_map() {
        let mut w = Warnings::default();
        w.push(Warning::ThreadFailures);
        w.push(Warning::TooBrief {
            threshold_secs: 0.01,
        });
        w.push(Warning::MissingThreads { count: 2 });
        w.push(Warning::NotEnoughFilesDone { min_pct: 90.0 });

        let v = match serde_json::to_value(&w) {
            Ok(v) => v,
            Err(err) => panic!("to_value failed: {err}"),
        };
        assert_eq!(
            v,
            serde_json::json!({
                "thread-failures": true,
                "too-brief": 0.01,
                "missing-threads": 2,
                "not-enough-files-done": 90.0,
            })
        );
    }
}
