use super::Agent;
use crate::containers::IndexCollection;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;

/// Collects every job which was dispatched on a path to a deadline miss.
#[derive(Debug, Default)]
pub struct FailureJobSetAgent {
    failure_job_set: IndexCollection,
}

impl FailureJobSetAgent {
    pub fn find_jobs_on_paths_to_deadline_misses(
        problem: &SchedulingProblem,
        options: &ReconfigurationOptions,
    ) -> Result<IndexCollection, ReconfigurationError> {
        let mut agent = FailureJobSetAgent::default();

        let result = explore(
            problem,
            options.exploration_options().with_early_exit(false),
            &mut agent,
        );
        if result.was_timed_out() {
            return Err(ReconfigurationError::AnalysisTimedOut);
        }

        Ok(agent.failure_job_set)
    }
}

impl Agent for FailureJobSetAgent {
    type Attachment = ();

    fn missed_deadline(&mut self, node: &mut ScheduleNode<()>, _late_job: &Job) {
        for job in node.scheduled_jobs().iter() {
            self.failure_job_set.insert(job);
        }
    }
}
