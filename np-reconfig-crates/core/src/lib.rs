//! Schedulability analysis and automatic reconfiguration of non-preemptive job sets.
//!
//! A [`SchedulingProblem`] is a set of jobs with uncertain arrival and execution times which are
//! dispatched by a work-conserving fixed-priority scheduler on a single processor. The
//! [`exploration`] module decides whether every possible dispatch order meets all deadlines, and
//! the [`reconfiguration`] module searches for modifications which make an unschedulable job set
//! schedulable.
pub mod agents;
pub mod containers;
pub mod exploration;
pub(crate) mod np_asserts;
pub mod problem;
pub mod reconfiguration;
pub mod statistics;

pub use convert_case;

pub use crate::exploration::explore;
pub use crate::problem::ProblemError;
pub use crate::problem::SchedulingProblem;
pub use crate::reconfiguration::verify_solution;
pub use crate::reconfiguration::Manager;
pub use crate::reconfiguration::ReconfigurationOptions;
pub use crate::reconfiguration::ReconfigurationOutcome;
pub use crate::reconfiguration::Solution;

#[doc(hidden)]
pub mod asserts {
    pub use crate::np_assert_advanced;
    pub use crate::np_assert_eq_simple;
    pub use crate::np_assert_moderate;
    pub use crate::np_assert_simple;
    pub use crate::np_asserts::NP_ASSERT_ADVANCED;
    pub use crate::np_asserts::NP_ASSERT_LEVEL_DEFINITION;
    pub use crate::np_asserts::NP_ASSERT_MODERATE;
    pub use crate::np_asserts::NP_ASSERT_SIMPLE;
}
