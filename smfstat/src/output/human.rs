use std::io::Write;

use smfstat_core::{RunConfig, WorkerResult};

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput;

impl OutputFormatter for HumanReadableOutput {
    fn print_report(
        &self,
        results: &[WorkerResult],
        cfg: &RunConfig,
        out: &mut dyn Write,
    ) -> smfstat_core::Result<()> {
        smfstat_core::render_human(results, cfg, out)
    }
}
