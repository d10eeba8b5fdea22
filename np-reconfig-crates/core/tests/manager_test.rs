#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use np_reconfig_core::reconfiguration::StrategySelection;
use np_reconfig_core::Manager;
use np_reconfig_core::ReconfigurationOptions;
use np_reconfig_core::ReconfigurationOutcome;
use np_reconfig_core::Solution;

#[test]
fn pessimistic_solutions_take_precedence() {
    let problem = helpers::interfering_long_job();
    let mut manager = Manager::new();

    let outcome = manager.run(&problem, &ReconfigurationOptions::default());

    assert_eq!(
        outcome,
        Ok(ReconfigurationOutcome::Fixed(vec![
            Solution::PessimisticExecutionTime {
                job: helpers::id(0),
                best_case: 1,
                worst_case: 2
            },
            Solution::PessimisticExecutionTime {
                job: helpers::id(6),
                best_case: 7,
                worst_case: 8
            },
        ]))
    );
    assert_eq!(manager.statistics().num_cuts, 0);
}

#[test]
fn graph_strategy_can_be_selected_alone() {
    let problem = helpers::uncertain_releases();
    let options = ReconfigurationOptions {
        strategy: StrategySelection::GraphOnly,
        ..Default::default()
    };

    let outcome = Manager::new().run(&problem, &options);

    assert_eq!(
        outcome,
        Ok(ReconfigurationOutcome::Fixed(vec![Solution::Precedence {
            from: helpers::id(0),
            to: helpers::id(2)
        }]))
    );
}

#[test]
fn pessimistic_strategy_fixes_uncertain_releases() {
    let problem = helpers::uncertain_releases();

    let outcome = Manager::new().run(&problem, &ReconfigurationOptions::default());

    assert_eq!(
        outcome,
        Ok(ReconfigurationOutcome::Fixed(vec![
            Solution::PessimisticArrivalTime {
                job: helpers::id(2),
                earliest: 10,
                latest: 17
            }
        ]))
    );
}

#[test]
fn hopeless_job_set_is_reported() {
    let problem = helpers::long_job_first();
    let mut manager = Manager::new();

    let outcome = manager.run(&problem, &ReconfigurationOptions::default());

    assert_eq!(outcome, Ok(ReconfigurationOutcome::NoFixFound));
    assert!(manager.statistics().num_explorations > 1);
}

#[test]
fn fixed_job_set_is_already_schedulable() {
    let mut problem = helpers::uncertain_releases();
    problem.job_mut(2).assume_pessimistic_arrival();

    let outcome = Manager::new().run(&problem, &ReconfigurationOptions::default());

    assert_eq!(outcome, Ok(ReconfigurationOutcome::AlreadySchedulable));
}
