use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use smfstat_core::{RunConfig, WorkerResult};

/// Finished run as handed over by the collector: one config plus one
/// entry per worker thread, in collection order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ResultsDocument {
    #[serde(default)]
    pub config: RunConfig,
    pub results: Vec<WorkerResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

pub(crate) fn load(path: &Path) -> anyhow::Result<ResultsDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results document: {}", path.display()))?;
    let doc = parse(&raw, DocumentFormat::from_path(path))
        .with_context(|| format!("invalid results document: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        workers = doc.results.len(),
        "loaded results document"
    );
    Ok(doc)
}

fn parse(raw: &str, format: DocumentFormat) -> anyhow::Result<ResultsDocument> {
    let doc: ResultsDocument = match format {
        DocumentFormat::Json => serde_json::from_str(raw)?,
        DocumentFormat::Yaml => serde_yaml::from_str(raw)?,
    };
    Ok(doc)
}
