use std::io::Write;

use smfstat_core::{RunConfig, WorkerResult};

use crate::cli::OutputFormat;

mod human;
mod json;

pub(crate) trait OutputFormatter {
    fn print_report(
        &self,
        results: &[WorkerResult],
        cfg: &RunConfig,
        out: &mut dyn Write,
    ) -> smfstat_core::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
