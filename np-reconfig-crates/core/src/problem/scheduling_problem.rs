use std::collections::VecDeque;

use super::Job;
use super::JobId;
use super::JobIndex;
use super::PrecedenceConstraint;
use super::PrecedenceConstraints;
use super::ProblemError;
use crate::containers::HashMap;

/// A job set together with the precedence constraints between its jobs.
///
/// Strategies copy the problem for every trial and mutate the copy; the problem handed to the
/// [`Manager`](crate::Manager) is never modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulingProblem {
    jobs: Vec<Job>,
    precedence_constraints: PrecedenceConstraints,
}

impl SchedulingProblem {
    pub fn new(jobs: Vec<Job>, precedence_constraints: Vec<PrecedenceConstraint>) -> Self {
        SchedulingProblem {
            jobs,
            precedence_constraints: PrecedenceConstraints::new(precedence_constraints),
        }
    }

    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, index: JobIndex) -> &Job {
        &self.jobs[index]
    }

    pub fn job_mut(&mut self, index: JobIndex) -> &mut Job {
        &mut self.jobs[index]
    }

    pub fn precedence_constraints(&self) -> &PrecedenceConstraints {
        &self.precedence_constraints
    }

    pub fn precedence_constraints_mut(&mut self) -> &mut PrecedenceConstraints {
        &mut self.precedence_constraints
    }

    pub fn job_index_of(&self, id: JobId) -> Option<JobIndex> {
        self.jobs.iter().position(|job| job.id() == id)
    }

    pub fn job_mut_by_id(&mut self, id: JobId) -> Result<&mut Job, ProblemError> {
        self.jobs
            .iter_mut()
            .find(|job| job.id() == id)
            .ok_or(ProblemError::UnknownJob(id))
    }

    pub(crate) fn job_index_lookup(&self) -> HashMap<JobId, JobIndex> {
        self.jobs.iter().map(|job| (job.id(), job.index())).collect()
    }

    /// Checks that the job indices are exactly `0..n` in order.
    pub fn validate_job_indices(&self) -> Result<(), ProblemError> {
        for (expected, job) in self.jobs.iter().enumerate() {
            if job.index() != expected {
                return Err(ProblemError::NonDenseJobIndex {
                    id: job.id(),
                    expected,
                    actual: job.index(),
                });
            }
        }
        Ok(())
    }

    /// Checks that every precedence constraint refers to existing jobs and that the constraints
    /// are acyclic.
    pub fn validate_precedence_constraints(&self) -> Result<(), ProblemError> {
        let lookup = self.job_index_lookup();

        let mut successors = vec![Vec::new(); self.jobs.len()];
        let mut num_predecessors = vec![0_usize; self.jobs.len()];
        for constraint in self.precedence_constraints.iter() {
            let from = *lookup
                .get(&constraint.from())
                .ok_or(ProblemError::UnknownJob(constraint.from()))?;
            let to = *lookup
                .get(&constraint.to())
                .ok_or(ProblemError::UnknownJob(constraint.to()))?;

            successors[from].push(to);
            num_predecessors[to] += 1;
        }

        let mut unconstrained = (0..self.jobs.len())
            .filter(|&index| num_predecessors[index] == 0)
            .collect::<VecDeque<_>>();
        while let Some(index) = unconstrained.pop_front() {
            for &successor in &successors[index] {
                num_predecessors[successor] -= 1;
                if num_predecessors[successor] == 0 {
                    unconstrained.push_back(successor);
                }
            }
        }

        match num_predecessors.iter().position(|&count| count > 0) {
            Some(index) => Err(ProblemError::CyclicPrecedence(self.jobs[index].id())),
            None => Ok(()),
        }
    }

    pub fn validate(&self) -> Result<(), ProblemError> {
        self.validate_job_indices()?;
        self.validate_precedence_constraints()
    }
}
