use super::Agent;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::JobSequence;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;

/// Tracks the jobs dispatched along every path and records the paths of complete schedules.
#[derive(Debug, Default)]
pub struct JobSequenceHistoryAgent {
    finished_sequences: Vec<JobSequence>,
}

impl JobSequenceHistoryAgent {
    /// The job sequences of all complete schedules; merged paths share one sequence.
    pub fn record(
        problem: &SchedulingProblem,
        options: &ReconfigurationOptions,
    ) -> Result<Vec<JobSequence>, ReconfigurationError> {
        let mut agent = JobSequenceHistoryAgent::default();

        let result = explore(
            problem,
            options.exploration_options().with_early_exit(false),
            &mut agent,
        );
        if result.was_timed_out() {
            return Err(ReconfigurationError::AnalysisTimedOut);
        }

        Ok(agent.finished_sequences)
    }
}

impl Agent for JobSequenceHistoryAgent {
    type Attachment = JobSequence;

    fn create_next_node_attachment(
        &mut self,
        parent: &ScheduleNode<JobSequence>,
        next_job: &Job,
    ) -> JobSequence {
        parent.attachment().extended_copy(next_job.index())
    }

    fn merge_node_attachments(
        &mut self,
        destination: &mut ScheduleNode<JobSequence>,
        parent: &ScheduleNode<JobSequence>,
        next_job: &Job,
    ) {
        destination
            .attachment_mut()
            .merge(&parent.attachment().extended_copy(next_job.index()));
    }

    fn finished_node(&mut self, node: &mut ScheduleNode<JobSequence>) {
        self.finished_sequences.push(node.attachment().clone());
    }
}
