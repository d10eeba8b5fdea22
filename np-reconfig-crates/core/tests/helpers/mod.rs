#![allow(
    dead_code,
    reason = "it is used in other test files, but somehow compiler can't see it"
)]
#![cfg(test)]

use np_reconfig_core::problem::Interval;
use np_reconfig_core::problem::Job;
use np_reconfig_core::problem::JobId;
use np_reconfig_core::problem::Priority;
use np_reconfig_core::problem::Time;
use np_reconfig_core::SchedulingProblem;

/// A job of task `index` with job number `index`.
pub(crate) fn job(
    index: usize,
    arrival: (Time, Time),
    cost: (Time, Time),
    deadline: Time,
    priority: Priority,
) -> Job {
    Job::new(
        id(index),
        index,
        Interval::new(arrival.0, arrival.1),
        Interval::new(cost.0, cost.1),
        deadline,
        priority,
    )
}

pub(crate) fn id(index: usize) -> JobId {
    JobId::new(index as u64, index as u64)
}

/// Nine periodic-looking jobs where the long job 8 may push job 1 over its deadline, and the
/// uncertain execution times of jobs 0 and 6 make things worse.
pub(crate) fn interfering_long_job() -> SchedulingProblem {
    SchedulingProblem::new(
        vec![
            job(0, (0, 0), (1, 2), 10, 10),
            job(1, (10, 10), (1, 2), 20, 20),
            job(2, (20, 20), (1, 2), 30, 30),
            job(3, (30, 30), (1, 2), 40, 40),
            job(4, (40, 40), (1, 2), 50, 50),
            job(5, (50, 50), (1, 2), 60, 60),
            job(6, (0, 0), (7, 8), 30, 30),
            job(7, (30, 30), (7, 8), 60, 60),
            job(8, (0, 0), (3, 13), 60, 60),
        ],
        vec![],
    )
}

/// Three jobs with uncertain releases; the long job 2 may start before both short jobs.
pub(crate) fn uncertain_releases() -> SchedulingProblem {
    SchedulingProblem::new(
        vec![
            job(0, (10, 18), (8, 8), 50, 0),
            job(1, (10, 17), (8, 8), 50, 1),
            job(2, (10, 17), (100, 100), 900, 2),
        ],
        vec![],
    )
}

/// Job 0 always runs first and keeps job 1 from meeting its deadline; no modification can help.
pub(crate) fn long_job_first() -> SchedulingProblem {
    SchedulingProblem::new(
        vec![
            job(0, (0, 0), (800, 800), 900, 1),
            job(1, (1, 1), (1, 1), 50, 2),
        ],
        vec![],
    )
}

/// After job 0, either job 1 or job 2 should go next. The long job 4 may start before them and
/// make both miss their deadlines, and jobs 5 and 6 would do the same if job 4 were delayed.
pub(crate) fn blocking_long_job() -> SchedulingProblem {
    SchedulingProblem::new(
        vec![
            job(0, (0, 0), (10, 20), 20, 1),
            job(1, (18, 18), (3, 3), 30, 2),
            job(2, (17, 17), (3, 3), 30, 3),
            job(3, (18, 18), (3, 3), 30, 4),
            job(4, (13, 13), (100, 100), 900, 5),
            job(5, (14, 14), (100, 100), 900, 6),
            job(6, (15, 15), (100, 100), 900, 7),
        ],
        vec![],
    )
}

/// Either job 2 or job 3 goes first, after which dispatching the long job 1 before the urgent
/// job 0 is a mistake in both branches.
pub(crate) fn same_mistake_in_two_branches() -> SchedulingProblem {
    SchedulingProblem::new(
        vec![
            job(0, (1, 5), (1, 1), 10, 0),
            job(1, (1, 1), (100, 100), 900, 1),
            job(2, (0, 1), (1, 1), 900, 2),
            job(3, (0, 0), (1, 1), 900, 3),
        ],
        vec![],
    )
}
