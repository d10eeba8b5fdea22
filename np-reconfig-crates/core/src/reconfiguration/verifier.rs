use log::debug;

use super::ReconfigurationOptions;
use super::Solution;
use crate::agents::PassiveAgent;
use crate::exploration::explore;
use crate::problem::ProblemError;
use crate::problem::SchedulingProblem;

/// Applies `solutions` to a copy of `problem` and checks that the result is schedulable.
///
/// An empty list of solutions is never accepted, and neither is a pass which ran out of time.
pub fn verify_solution(
    problem: &SchedulingProblem,
    solutions: &[Solution],
    options: &ReconfigurationOptions,
) -> Result<bool, ProblemError> {
    if solutions.is_empty() {
        return Ok(false);
    }

    let mut modified = problem.clone();
    for solution in solutions {
        solution.apply(&mut modified)?;
    }
    modified.validate_precedence_constraints()?;

    let result = explore(&modified, options.exploration_options(), &mut PassiveAgent);
    debug!(
        "Verification explored {} nodes, schedulable: {}",
        result.statistics().num_nodes,
        result.is_schedulable()
    );

    Ok(result.is_schedulable())
}
