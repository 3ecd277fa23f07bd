use crate::exit_codes::ExitCode;

#[derive(Debug)]
pub enum RunError {
    InvalidInput(anyhow::Error),
    /// Report was printed, but the run did not meet its completion criteria.
    QualityGate(smfstat_core::Error),
    RuntimeError(anyhow::Error),
}

impl RunError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::QualityGate(e) => ExitCode::from_report_error(e),
            Self::RuntimeError(_) => ExitCode::RuntimeError,
        }
    }
}

impl From<smfstat_core::Error> for RunError {
    fn from(err: smfstat_core::Error) -> Self {
        if err.is_quality_failure() {
            Self::QualityGate(err)
        } else if err.is_input_violation() {
            Self::InvalidInput(err.into())
        } else {
            Self::RuntimeError(err.into())
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(e) | Self::RuntimeError(e) => write!(f, "{e:#}"),
            Self::QualityGate(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) | Self::RuntimeError(e) => Some(e.as_ref()),
            Self::QualityGate(e) => Some(e),
        }
    }
}
