#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// One or more threads reported a nonzero status.
    ThreadFailures = 10,

    /// Fewer files were processed than the configured minimum.
    NotEnoughFilesDone = 11,

    /// Invalid CLI flags, unreadable/malformed results document, or results
    /// that cannot be reported on (no threads, zero iterations).
    InvalidInput = 30,

    /// Internal/runtime error (e.g. failing to write the report).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_report_error(err: &smfstat_core::Error) -> Self {
        use smfstat_core::Error;

        match err {
            Error::ThreadFailures => Self::ThreadFailures,
            Error::NotEnoughFilesDone { .. } => Self::NotEnoughFilesDone,
            Error::NoResults | Error::ZeroIterations => Self::InvalidInput,
            Error::Json(_) | Error::Io(_) => Self::RuntimeError,
        }
    }
}
