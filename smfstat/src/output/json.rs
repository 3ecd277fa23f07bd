use std::io::Write;

use smfstat_core::{RunConfig, WorkerResult};

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_report(
        &self,
        results: &[WorkerResult],
        cfg: &RunConfig,
        out: &mut dyn Write,
    ) -> smfstat_core::Result<()> {
        let doc = smfstat_core::render_structured(results, cfg)?;
        doc.write_json_pretty(out)?;
        out.flush()?;
        Ok(())
    }
}
