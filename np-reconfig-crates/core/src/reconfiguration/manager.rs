use log::info;
use log::warn;

use super::strategies::apply_graph_strategy;
use super::strategies::apply_pessimistic_strategy;
use super::ReconfigurationOptions;
use super::Solution;
use super::StrategySelection;
use crate::agents::PassiveAgent;
use crate::create_statistics_struct;
use crate::exploration::explore;
use crate::problem::ProblemError;
use crate::problem::SchedulingProblem;

create_statistics_struct!(
    /// Counters gathered over a whole reconfiguration run.
    ReconfigurationStatistics {
        /// Every exploration pass, including those of the strategies.
        num_explorations: usize,
        num_cuts: usize,
        num_attempts: usize,
        num_undone_attempts: usize,
        /// Jobs which lie on a path to a deadline miss.
        num_critical_jobs: usize,
});

/// What a reconfiguration run concluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconfigurationOutcome {
    /// The job set meets all deadlines without modifications.
    AlreadySchedulable,
    /// The job set meets all deadlines once all of these solutions are applied.
    Fixed(Vec<Solution>),
    NoFixFound,
}

/// Runs the selected strategies on a job set until one of them finds a fix.
#[derive(Debug, Default)]
pub struct Manager {
    statistics: ReconfigurationStatistics,
}

impl Manager {
    pub fn new() -> Manager {
        Manager::default()
    }

    pub fn statistics(&self) -> &ReconfigurationStatistics {
        &self.statistics
    }

    /// Checks `problem` and, when it is not schedulable, searches for modifications which make it
    /// schedulable.
    ///
    /// The pessimistic strategy runs before the graph strategy; the first non-empty list of
    /// solutions is returned. `problem` itself is never modified.
    pub fn run(
        &mut self,
        problem: &SchedulingProblem,
        options: &ReconfigurationOptions,
    ) -> Result<ReconfigurationOutcome, ProblemError> {
        problem.validate()?;

        self.statistics.num_explorations += 1;
        let probe = explore(problem, options.exploration_options(), &mut PassiveAgent);
        if probe.is_schedulable() {
            info!("The job set is already schedulable");
            return Ok(ReconfigurationOutcome::AlreadySchedulable);
        }
        if probe.was_timed_out() {
            warn!("Could not decide whether the job set is schedulable within the limits");
        }

        let use_pessimistic = matches!(
            options.strategy,
            StrategySelection::PessimisticThenGraph | StrategySelection::PessimisticOnly
        );
        let use_graph = matches!(
            options.strategy,
            StrategySelection::PessimisticThenGraph | StrategySelection::GraphOnly
        );

        if use_pessimistic {
            let solutions = apply_pessimistic_strategy(problem, options, &mut self.statistics);
            if !solutions.is_empty() {
                info!("The pessimistic strategy found {} solutions", solutions.len());
                return Ok(ReconfigurationOutcome::Fixed(solutions));
            }
        }

        if use_graph {
            let solutions = apply_graph_strategy(problem, options, &mut self.statistics);
            if !solutions.is_empty() {
                info!("The graph strategy found {} solutions", solutions.len());
                return Ok(ReconfigurationOutcome::Fixed(solutions));
            }
        }

        Ok(ReconfigurationOutcome::NoFixFound)
    }
}
