use crate::cli::{OutputFormat, ReportArgs};
use crate::input::{self, ResultsDocument};
use crate::output;
use crate::run_error::RunError;

pub fn report(args: ReportArgs) -> Result<(), RunError> {
    let ResultsDocument {
        mut config,
        results,
    } = input::load(&args.results).map_err(RunError::InvalidInput)?;

    if let Some(pct) = args.min_pct_files {
        config.min_completion_pct = pct;
    }
    let format = output_format(&args, &config);
    config.json_output_requested = format == OutputFormat::Json;

    tracing::debug!(?format, ?config, "report settings");

    let out = output::formatter(format);
    let mut stdout = std::io::stdout().lock();
    out.print_report(&results, &config, &mut stdout)?;

    Ok(())
}

fn output_format(args: &ReportArgs, config: &smfstat_core::RunConfig) -> OutputFormat {
    match args.output {
        Some(format) => format,
        None if config.json_output_requested => OutputFormat::Json,
        None => OutputFormat::HumanReadable,
    }
}
