#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use np_reconfig_core::problem::JobId;
use np_reconfig_core::verify_solution;
use np_reconfig_core::ProblemError;
use np_reconfig_core::ReconfigurationOptions;
use np_reconfig_core::Solution;

#[test]
fn empty_solution_is_rejected() {
    let problem = helpers::uncertain_releases();

    assert_eq!(
        verify_solution(&problem, &[], &ReconfigurationOptions::default()),
        Ok(false)
    );
}

#[test]
fn insufficient_solution_is_rejected() {
    let problem = helpers::uncertain_releases();
    let solutions = [Solution::Precedence {
        from: helpers::id(2),
        to: helpers::id(1),
    }];

    assert_eq!(
        verify_solution(&problem, &solutions, &ReconfigurationOptions::default()),
        Ok(false)
    );
}

#[test]
fn unknown_job_is_an_error() {
    let problem = helpers::uncertain_releases();
    let solutions = [Solution::PessimisticArrivalTime {
        job: JobId::new(9, 9),
        earliest: 0,
        latest: 1,
    }];

    assert_eq!(
        verify_solution(&problem, &solutions, &ReconfigurationOptions::default()),
        Err(ProblemError::UnknownJob(JobId::new(9, 9)))
    );
}

#[test]
fn verification_does_not_modify_the_problem() {
    let problem = helpers::uncertain_releases();
    let copy = problem.clone();
    let solutions = [Solution::Precedence {
        from: helpers::id(0),
        to: helpers::id(2),
    }];

    assert_eq!(
        verify_solution(&problem, &solutions, &ReconfigurationOptions::default()),
        Ok(true)
    );
    assert_eq!(problem, copy);
}
