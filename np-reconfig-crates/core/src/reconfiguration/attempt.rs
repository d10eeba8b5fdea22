use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;

use super::RatingGraphCut;
use super::Solution;
use crate::problem::Checkpoint;
use crate::problem::JobIndex;
use crate::problem::PrecedenceConstraint;
use crate::problem::ProblemError;
use crate::problem::SchedulingProblem;

/// A trial modification which lets `before` precede every job of `after`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecedenceAttempt {
    before: JobIndex,
    after: Vec<JobIndex>,
}

/// The proof that a [`PrecedenceAttempt`] was applied; needed to undo it.
#[derive(Debug)]
#[allow(
    missing_copy_implementations,
    reason = "an applied attempt is consumed when it is undone"
)]
#[must_use = "an applied attempt has to be undone or kept"]
pub struct AppliedAttempt {
    checkpoint: Checkpoint,
}

impl PrecedenceAttempt {
    pub fn new(before: JobIndex, after: Vec<JobIndex>) -> PrecedenceAttempt {
        PrecedenceAttempt { before, after }
    }

    pub fn before(&self) -> JobIndex {
        self.before
    }

    pub fn after(&self) -> &[JobIndex] {
        &self.after
    }

    /// Adds the constraints of this attempt to `problem`.
    ///
    /// If the constraints would close a cycle, `problem` is returned to its earlier state and the
    /// error is reported instead.
    pub fn apply(&self, problem: &mut SchedulingProblem) -> Result<AppliedAttempt, ProblemError> {
        let before = problem.job(self.before).id();
        let after = self
            .after
            .iter()
            .map(|&job| problem.job(job).id())
            .collect::<Vec<_>>();

        let constraints = problem.precedence_constraints_mut();
        let checkpoint = constraints.new_checkpoint();
        for to in after {
            constraints.push(PrecedenceConstraint::without_suspension(before, to));
        }

        if let Err(error) = problem.validate_precedence_constraints() {
            debug!("Attempt {self} is rejected: {error}");
            let _ = problem.precedence_constraints_mut().restore(checkpoint);
            return Err(error);
        }

        Ok(AppliedAttempt { checkpoint })
    }

    /// Removes exactly the constraints added by [`PrecedenceAttempt::apply`].
    pub fn undo(&self, problem: &mut SchedulingProblem, applied: AppliedAttempt) {
        let _ = problem
            .precedence_constraints_mut()
            .restore(applied.checkpoint);
    }

    /// Reports the constraints of this attempt as [`Solution`]s.
    pub fn add_solutions(&self, problem: &SchedulingProblem, solutions: &mut Vec<Solution>) {
        let from = problem.job(self.before).id();
        solutions.extend(self.after.iter().map(|&job| Solution::Precedence {
            from,
            to: problem.job(job).id(),
        }));
    }
}

impl Display for PrecedenceAttempt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} before {:?}", self.before, self.after)
    }
}

/// One attempt per allowed job of the cut, each letting that job precede all forbidden jobs.
///
/// The jobs found by widening the cut count as well: extra allowed jobs are tried after the
/// allowed ones, and extra forbidden jobs are delayed together with the forbidden ones.
pub fn generate_precedence_attempts(cut: &RatingGraphCut) -> Vec<PrecedenceAttempt> {
    let after = cut
        .forbidden_jobs
        .iter()
        .chain(&cut.extra_forbidden_jobs)
        .copied()
        .collect::<Vec<_>>();

    cut.allowed_jobs
        .iter()
        .chain(&cut.extra_allowed_jobs)
        .map(|&allowed| PrecedenceAttempt::new(allowed, after.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Interval;
    use crate::problem::Job;
    use crate::problem::JobId;
    use crate::reconfiguration::RatingNodeId;
    use crate::reconfiguration::SubGraph;

    fn problem(constraints: Vec<PrecedenceConstraint>) -> SchedulingProblem {
        let jobs = (0..3)
            .map(|index| {
                Job::new(
                    JobId::new(0, index as u64),
                    index,
                    Interval::point(0),
                    Interval::point(1),
                    10,
                    index as i64,
                )
            })
            .collect();
        SchedulingProblem::new(jobs, constraints)
    }

    #[test]
    fn undo_restores_the_constraints() {
        let existing = PrecedenceConstraint::without_suspension(JobId::new(0, 0), JobId::new(0, 1));
        let mut problem = problem(vec![existing]);
        let before = problem.clone();

        let attempt = PrecedenceAttempt::new(2, vec![0, 1]);
        let applied = attempt.apply(&mut problem).expect("no cycle");
        assert!(problem.precedence_constraints().is_set_equal(&[
            existing,
            PrecedenceConstraint::without_suspension(JobId::new(0, 2), JobId::new(0, 0)),
            PrecedenceConstraint::without_suspension(JobId::new(0, 2), JobId::new(0, 1)),
        ]));

        attempt.undo(&mut problem, applied);
        assert_eq!(problem, before);
    }

    #[test]
    fn cyclic_attempt_leaves_problem_untouched() {
        let existing = PrecedenceConstraint::without_suspension(JobId::new(0, 0), JobId::new(0, 1));
        let mut problem = problem(vec![existing]);
        let before = problem.clone();

        let result = PrecedenceAttempt::new(1, vec![0]).apply(&mut problem);

        assert!(matches!(result, Err(ProblemError::CyclicPrecedence(_))));
        assert_eq!(problem, before);
    }

    #[test]
    fn one_attempt_per_allowed_job() {
        let cut = RatingGraphCut {
            node: RatingNodeId::ROOT,
            previous_jobs: SubGraph::default(),
            forbidden_jobs: vec![2],
            allowed_jobs: vec![0, 1],
            extra_forbidden_jobs: vec![],
            extra_allowed_jobs: vec![],
        };

        let attempts = generate_precedence_attempts(&cut);

        assert_eq!(
            attempts,
            vec![
                PrecedenceAttempt::new(0, vec![2]),
                PrecedenceAttempt::new(1, vec![2])
            ]
        );

        let problem = problem(vec![]);
        let mut solutions = vec![];
        attempts[1].add_solutions(&problem, &mut solutions);
        assert_eq!(
            solutions,
            vec![Solution::Precedence {
                from: JobId::new(0, 1),
                to: JobId::new(0, 2)
            }]
        );
    }

    #[test]
    fn widened_jobs_take_part_in_the_attempts() {
        let cut = RatingGraphCut {
            node: RatingNodeId::ROOT,
            previous_jobs: SubGraph::default(),
            forbidden_jobs: vec![2],
            allowed_jobs: vec![0],
            extra_forbidden_jobs: vec![3],
            extra_allowed_jobs: vec![1],
        };

        assert_eq!(
            generate_precedence_attempts(&cut),
            vec![
                PrecedenceAttempt::new(0, vec![2, 3]),
                PrecedenceAttempt::new(1, vec![2, 3])
            ]
        );
    }
}
