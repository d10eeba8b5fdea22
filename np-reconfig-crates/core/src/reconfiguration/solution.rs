use std::fmt::Display;
use std::fmt::Formatter;

use crate::problem::JobId;
use crate::problem::PrecedenceConstraint;
use crate::problem::ProblemError;
use crate::problem::SchedulingProblem;
use crate::problem::Time;

/// A single modification of a job set which, together with the other modifications returned by
/// the same run, makes the job set schedulable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solution {
    /// Job `to` may only start after job `from` has finished.
    Precedence { from: JobId, to: JobId },
    /// The job always arrives at `latest` rather than somewhere in `[earliest, latest]`.
    PessimisticArrivalTime {
        job: JobId,
        earliest: Time,
        latest: Time,
    },
    /// The job always runs for `worst_case` rather than somewhere in `[best_case, worst_case]`.
    PessimisticExecutionTime {
        job: JobId,
        best_case: Time,
        worst_case: Time,
    },
}

impl Solution {
    /// Applies the modification to `problem`.
    ///
    /// A precedence constraint is added without suspension; the acyclicity of the resulting
    /// constraints is not checked here.
    pub fn apply(&self, problem: &mut SchedulingProblem) -> Result<(), ProblemError> {
        match *self {
            Solution::Precedence { from, to } => {
                for id in [from, to] {
                    if problem.job_index_of(id).is_none() {
                        return Err(ProblemError::UnknownJob(id));
                    }
                }
                problem
                    .precedence_constraints_mut()
                    .push(PrecedenceConstraint::without_suspension(from, to));
            }
            Solution::PessimisticArrivalTime { job, .. } => {
                problem.job_mut_by_id(job)?.assume_pessimistic_arrival();
            }
            Solution::PessimisticExecutionTime { job, .. } => {
                problem.job_mut_by_id(job)?.assume_pessimistic_running_time();
            }
        }

        Ok(())
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Precedence { from, to } => {
                write!(f, "Add precedence constraint {from} -> {to}")
            }
            Solution::PessimisticArrivalTime {
                job,
                earliest,
                latest,
            } => write!(
                f,
                "Let job {job} arrive at {latest} instead of within [{earliest}, {latest}]"
            ),
            Solution::PessimisticExecutionTime {
                job,
                best_case,
                worst_case,
            } => write!(
                f,
                "Let job {job} run for {worst_case} instead of within [{best_case}, {worst_case}]"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Interval;
    use crate::problem::Job;

    fn problem() -> SchedulingProblem {
        let jobs = (0..2)
            .map(|index| {
                Job::new(
                    JobId::new(1, index as u64),
                    index,
                    Interval::new(0, 5),
                    Interval::new(1, 3),
                    20,
                    index as i64,
                )
            })
            .collect();
        SchedulingProblem::new(jobs, vec![])
    }

    #[test]
    fn precedence_solution_adds_constraint() {
        let mut problem = problem();
        let solution = Solution::Precedence {
            from: JobId::new(1, 1),
            to: JobId::new(1, 0),
        };

        solution.apply(&mut problem).expect("both jobs exist");

        assert!(problem
            .precedence_constraints()
            .is_set_equal(&[PrecedenceConstraint::without_suspension(
                JobId::new(1, 1),
                JobId::new(1, 0)
            )]));
    }

    #[test]
    fn pessimistic_solutions_tighten_the_job() {
        let mut problem = problem();

        Solution::PessimisticArrivalTime {
            job: JobId::new(1, 0),
            earliest: 0,
            latest: 5,
        }
        .apply(&mut problem)
        .expect("job exists");
        Solution::PessimisticExecutionTime {
            job: JobId::new(1, 1),
            best_case: 1,
            worst_case: 3,
        }
        .apply(&mut problem)
        .expect("job exists");

        assert_eq!(problem.job(0).arrival(), Interval::point(5));
        assert_eq!(problem.job(0).cost(), Interval::new(1, 3));
        assert_eq!(problem.job(1).cost(), Interval::point(3));
    }

    #[test]
    fn unknown_job_is_reported() {
        let mut problem = problem();
        let solution = Solution::Precedence {
            from: JobId::new(1, 0),
            to: JobId::new(7, 7),
        };

        assert_eq!(
            solution.apply(&mut problem),
            Err(ProblemError::UnknownJob(JobId::new(7, 7)))
        );
        assert!(problem.precedence_constraints().is_empty());
    }

    #[test]
    fn solutions_are_described_by_job_id() {
        let solution = Solution::PessimisticArrivalTime {
            job: JobId::new(2, 3),
            earliest: 10,
            latest: 17,
        };

        assert_eq!(
            solution.to_string(),
            "Let job T2J3 arrive at 17 instead of within [10, 17]"
        );
    }
}
