use np_reconfig_core::reconfiguration::ReconfigurationError;
use np_reconfig_core::ProblemError;
use thiserror::Error;

use crate::parsers::JobSetParseError;

pub(crate) type NpReconfigResult<T> = Result<T, NpReconfigError>;

#[derive(Error, Debug)]
pub(crate) enum NpReconfigError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The input file was invalid, more details: {0}")]
    InvalidInput(#[from] JobSetParseError),
    #[error("The job set was invalid, more details: {0}")]
    InvalidProblem(#[from] ProblemError),
    #[error("The analysis failed, more details: {0}")]
    Analysis(#[from] ReconfigurationError),
}
