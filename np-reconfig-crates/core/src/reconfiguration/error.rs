use thiserror::Error;

use crate::problem::ProblemError;

/// Reasons for which a reconfiguration strategy gives up on a job set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconfigurationError {
    #[error("The analysis exceeded its time or depth limit")]
    AnalysisTimedOut,
    #[error("The job set became invalid: {0}")]
    InvalidProblem(#[from] ProblemError),
}
