//! The strategies which search for a set of [`Solution`](super::Solution)s.
//!
//! Each strategy works on its own copy of the job set and reports an empty list when it cannot
//! find a fix, including when one of its passes runs out of time.
mod graph;
mod pessimistic;

pub use graph::apply_graph_strategy;
pub use pessimistic::apply_pessimistic_strategy;

use super::ReconfigurationError;
use super::ReconfigurationOptions;
use super::ReconfigurationStatistics;
use crate::agents::PassiveAgent;
use crate::exploration::explore;
use crate::problem::SchedulingProblem;

/// Runs a plain pass which stops at the first deadline miss.
fn is_schedulable(
    problem: &SchedulingProblem,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> Result<bool, ReconfigurationError> {
    statistics.num_explorations += 1;

    let result = explore(problem, options.exploration_options(), &mut PassiveAgent);
    if result.was_timed_out() {
        return Err(ReconfigurationError::AnalysisTimedOut);
    }

    Ok(result.is_schedulable())
}
