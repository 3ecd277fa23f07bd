pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no worker results were collected, so there is nothing to report")]
    NoResults,

    #[error("`iterations` must be a positive integer")]
    ZeroIterations,

    #[error("at least one thread encountered error, test may be incomplete")]
    ThreadFailures,

    #[error(
        "not enough total files processed ({pct:.2}% < {min_pct:.2}%), change test parameters"
    )]
    NotEnoughFilesDone { pct: f64, min_pct: f64 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for run-quality failures raised after the report was printed.
    #[must_use]
    pub fn is_quality_failure(&self) -> bool {
        matches!(self, Self::ThreadFailures | Self::NotEnoughFilesDone { .. })
    }

    /// True when the caller handed over inputs that cannot be reported on.
    #[must_use]
    pub fn is_input_violation(&self) -> bool {
        matches!(self, Self::NoResults | Self::ZeroIterations)
    }
}
