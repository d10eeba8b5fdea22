use log::debug;
use log::info;
use log::warn;

use super::is_schedulable;
use crate::agents::FailureJobSetAgent;
use crate::problem::Job;
use crate::problem::JobIndex;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;
use crate::reconfiguration::ReconfigurationStatistics;
use crate::reconfiguration::Solution;

/// Tightens the timing assumptions of the jobs which lie on a path to a deadline miss.
///
/// First every such job is made pessimistic at once; if that does not help, no fix is reported.
/// Otherwise the jobs are relaxed one by one in ascending index order, and each job keeps only
/// the tightenings without which the job set would become unschedulable again.
pub fn apply_pessimistic_strategy(
    original: &SchedulingProblem,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> Vec<Solution> {
    match search_pessimistic_solutions(original, options, statistics) {
        Ok(solutions) => solutions,
        Err(error) => {
            warn!("Pessimistic strategy gave up: {error}");
            Vec::new()
        }
    }
}

fn search_pessimistic_solutions(
    original: &SchedulingProblem,
    options: &ReconfigurationOptions,
    statistics: &mut ReconfigurationStatistics,
) -> Result<Vec<Solution>, ReconfigurationError> {
    statistics.num_explorations += 1;
    let failure_job_set =
        FailureJobSetAgent::find_jobs_on_paths_to_deadline_misses(original, options)?;

    let mut critical_jobs = failure_job_set.iter().collect::<Vec<JobIndex>>();
    critical_jobs.sort_unstable();
    statistics.num_critical_jobs += critical_jobs.len();
    debug!("Jobs on paths to deadline misses: {critical_jobs:?}");

    let mut problem = original.clone();
    for &job in &critical_jobs {
        make_pessimistic(problem.job_mut(job));
    }
    if !is_schedulable(&problem, options, statistics)? {
        info!("Tightening all critical jobs does not make the job set schedulable");
        return Ok(Vec::new());
    }

    let mut solutions = Vec::new();
    for &index in &critical_jobs {
        let job = original.job(index);

        *problem.job_mut(index) = job.clone();
        if is_schedulable(&problem, options, statistics)? {
            continue;
        }

        if !job.arrival().is_point() {
            problem.job_mut(index).assume_pessimistic_arrival();
            if is_schedulable(&problem, options, statistics)? {
                solutions.push(arrival_solution(job));
                continue;
            }
            *problem.job_mut(index) = job.clone();
        }

        if !job.cost().is_point() {
            problem.job_mut(index).assume_pessimistic_running_time();
            if is_schedulable(&problem, options, statistics)? {
                solutions.push(execution_time_solution(job));
                continue;
            }
        }

        make_pessimistic(problem.job_mut(index));
        if !job.arrival().is_point() {
            solutions.push(arrival_solution(job));
        }
        if !job.cost().is_point() {
            solutions.push(execution_time_solution(job));
        }
    }

    Ok(solutions)
}

fn make_pessimistic(job: &mut Job) {
    job.assume_pessimistic_arrival();
    job.assume_pessimistic_running_time();
}

fn arrival_solution(job: &Job) -> Solution {
    Solution::PessimisticArrivalTime {
        job: job.id(),
        earliest: job.arrival().min(),
        latest: job.arrival().max(),
    }
}

fn execution_time_solution(job: &Job) -> Solution {
    Solution::PessimisticExecutionTime {
        job: job.id(),
        best_case: job.cost().min(),
        worst_case: job.cost().max(),
    }
}
