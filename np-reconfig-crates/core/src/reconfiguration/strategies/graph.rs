use log::debug;
use log::info;
use log::warn;

use crate::agents::CutCheckAgent;
use crate::agents::CutCheckOutcome;
use crate::agents::CutExploreAgent;
use crate::agents::CutTestAgent;
use crate::agents::RatingGraphAgent;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::cut_rating_graph;
use crate::reconfiguration::generate_precedence_attempts;
use crate::reconfiguration::sort_cuts_backward;
use crate::reconfiguration::RatingGraphCut;
use crate::reconfiguration::RatingNodeId;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;
use crate::reconfiguration::ReconfigurationStatistics;
use crate::reconfiguration::Solution;

/// Adds precedence constraints which steer the scheduler away from the bad choices in the rated
/// schedule-abstraction graph.
///
/// The cuts are handled starting with the one with the longest prefix. For each cut, the attempts
/// are tried in turn until one prevents the forbidden jobs from being dispatched at the point of
/// choice without causing failures elsewhere. When no attempt works for some cut, no fix is
/// reported at all.
pub fn apply_graph_strategy(
    original: &SchedulingProblem,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> Vec<Solution> {
    match search_precedence_solutions(original, options, statistics) {
        Ok(solutions) => solutions,
        Err(error) => {
            warn!("Graph strategy gave up: {error}");
            Vec::new()
        }
    }
}

fn search_precedence_solutions(
    original: &SchedulingProblem,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> Result<Vec<Solution>, ReconfigurationError> {
    statistics.num_explorations += 1;
    let rating_graph = RatingGraphAgent::generate(original, options)?;
    if rating_graph.rating(RatingNodeId::ROOT) == 0.0 {
        info!("No dispatch order meets all deadlines, precedence constraints cannot help");
        return Ok(Vec::new());
    }

    let mut cuts = cut_rating_graph(&rating_graph);
    sort_cuts_backward(&mut cuts);
    statistics.num_cuts += cuts.len();
    debug!("The rating graph has {} cuts", cuts.len());

    let mut problem = original.clone();
    let mut solutions = Vec::new();

    while !cuts.is_empty() {
        let mut cut = cuts.remove(0);

        statistics.num_explorations += CutExploreAgent::explore(&problem, &mut cut, options)?;

        statistics.num_explorations += 1;
        if CutCheckAgent::check(&problem, &cut, options) == CutCheckOutcome::NotExercised {
            debug!("The cut at node {:?} is no longer exercised", cut.node);
            continue;
        }

        if !try_attempts(&mut problem, &cut, &mut cuts, &mut solutions, options, statistics) {
            info!("No attempt fixes the cut at node {:?}", cut.node);
            return Ok(Vec::new());
        }
    }

    Ok(solutions)
}

/// Tries every attempt of `cut` and keeps the first one which works; returns whether there was
/// one.
///
/// The cuts which the accepted attempt fixes as well are removed from `remaining_cuts`.
fn try_attempts(
    problem: &mut SchedulingProblem,
    cut: &RatingGraphCut,
    remaining_cuts: &mut Vec<RatingGraphCut>,
    solutions: &mut Vec<Solution>,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> bool {
    for attempt in generate_precedence_attempts(cut) {
        statistics.num_attempts += 1;

        let Ok(applied) = attempt.apply(problem) else {
            continue;
        };

        statistics.num_explorations += 1;
        if CutCheckAgent::check(problem, cut, options) == CutCheckOutcome::NotExercised {
            statistics.num_explorations += 1;
            let test = CutTestAgent::perform(problem, remaining_cuts, options);

            if !test.has_unexpected_failures {
                debug!("Attempt {attempt} fixes the cut at node {:?}", cut.node);
                attempt.add_solutions(problem, solutions);

                for &index in test.fixed_cut_indices.iter().rev() {
                    let _ = remaining_cuts.remove(index);
                }
                return true;
            }
        }

        attempt.undo(problem, applied);
        statistics.num_undone_attempts += 1;
    }

    false
}
