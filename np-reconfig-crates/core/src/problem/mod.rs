//! The job sets which are analysed and reconfigured.
//!
//! A [`SchedulingProblem`] consists of [`Job`]s, whose arrival and execution times are given as
//! [`Interval`]s, and a list of [`PrecedenceConstraint`]s between them.
mod error;
mod interval;
mod job;
mod precedence;
mod scheduling_problem;

pub use error::ProblemError;
pub use interval::Interval;
pub use job::Job;
pub use job::JobId;
pub use precedence::Checkpoint;
pub use precedence::PrecedenceConstraint;
pub use precedence::PrecedenceConstraints;
pub use scheduling_problem::SchedulingProblem;

/// A point in time.
pub type Time = i64;
/// Lower values denote more urgent jobs.
pub type Priority = i64;
/// The dense, zero-based index of a job within its [`SchedulingProblem`].
pub type JobIndex = usize;
