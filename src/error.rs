use crate::assumptions::Scope;
use std::io;
use thiserror::Error;

pub type TestgenResult<T> = Result<T, TestgenError>;

#[derive(Debug, Error)]
pub enum TestgenError {
    /// Uniform bounds with `lo > hi`.
    #[error("invalid range: lo ({lo}) > hi ({hi})")]
    InvalidRange { lo: i128, hi: i128 },

    /// A schema was constructed with a size it cannot honour.
    #[error("invalid parameter {what} = {value}")]
    InvalidParameter { what: &'static str, value: u64 },

    /// A finalized testcase was rejected by one of the assumption scopes.
    #[error("assumption failed for {file} ({scope} scope)")]
    AssumptionFailed { file: String, scope: Scope },

    /// Generation already stopped because of an earlier assumption failure.
    #[error("generation halted after assumption failure in {file}")]
    Halted { file: String },

    /// No test is bound: nothing was opened yet or the slot was skipped.
    #[error("no active test (call next_test or set_test first)")]
    NoActiveTest,

    #[error("io error on {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },
}

impl TestgenError {
    pub fn io(file: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            file: file.into(),
            source,
        }
    }
}
