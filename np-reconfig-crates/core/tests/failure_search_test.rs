#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use np_reconfig_core::agents::FailureSearchAgent;
use np_reconfig_core::ReconfigurationOptions;
use np_reconfig_core::SchedulingProblem;

#[test]
fn failure_of_hopeless_job_set_is_its_first_dispatch() {
    let problem = helpers::long_job_first();

    let failures = FailureSearchAgent::find_all_failures(&problem, &ReconfigurationOptions::default())
        .expect("no limits were set");

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].to_string(), "0");
}

#[test]
fn failure_is_the_dispatch_before_the_miss() {
    let problem = SchedulingProblem::new(
        vec![
            helpers::job(0, (2, 2), (2, 2), 5, 0),
            helpers::job(1, (0, 3), (4, 4), 20, 1),
        ],
        vec![],
    );

    let failures = FailureSearchAgent::find_all_failures(&problem, &ReconfigurationOptions::default())
        .expect("no limits were set");

    assert_eq!(
        failures.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["1"]
    );
}

#[test]
fn schedulable_job_set_has_no_failures() {
    let mut problem = helpers::uncertain_releases();
    problem.job_mut(2).assume_pessimistic_arrival();

    let failures = FailureSearchAgent::find_all_failures(&problem, &ReconfigurationOptions::default())
        .expect("no limits were set");

    assert!(failures.is_empty());
}

#[test]
fn failures_are_minimal() {
    let problem = helpers::interfering_long_job();

    let failures = FailureSearchAgent::find_all_failures(&problem, &ReconfigurationOptions::default())
        .expect("no limits were set");

    assert!(!failures.is_empty());
    for (index, failure) in failures.iter().enumerate() {
        for (other_index, other) in failures.iter().enumerate() {
            if index != other_index {
                assert!(!other.is_prefix_of(failure, false));
            }
        }
    }
}
