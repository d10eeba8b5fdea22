use thiserror::Error;

use super::JobId;

/// Errors caused by a malformed job set or by a modification which refers to jobs outside of it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Job {0} does not exist in the job set")]
    UnknownJob(JobId),
    #[error("The precedence constraints contain a cycle through job {0}")]
    CyclicPrecedence(JobId),
    #[error("Job {id} has index {actual}, but index {expected} was expected")]
    NonDenseJobIndex {
        id: JobId,
        expected: usize,
        actual: usize,
    },
}
