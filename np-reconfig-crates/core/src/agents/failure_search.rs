use log::debug;

use super::Agent;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::JobSequence;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;

#[derive(Clone, Debug, Default)]
pub struct FailureSearchAttachment {
    job_sequence: JobSequence,
    has_missed_deadline: bool,
}

/// Collects the minimal job sequences which lead to a deadline miss or a dead end.
///
/// A failure is minimal when no other known failure is a prefix of it.
#[derive(Debug, Default)]
pub struct FailureSearchAgent {
    failures: Vec<JobSequence>,
    did_update_failures: bool,
}

impl FailureSearchAgent {
    /// Repeats exploration passes until a pass discovers no new minimal failure.
    pub fn find_all_failures(
        problem: &SchedulingProblem,
        options: &ReconfigurationOptions,
    ) -> Result<Vec<JobSequence>, ReconfigurationError> {
        let exploration_options = options.exploration_options().with_early_exit(false);

        let mut failures = Vec::new();
        loop {
            let mut agent = FailureSearchAgent {
                failures,
                did_update_failures: false,
            };

            let result = explore(problem, exploration_options, &mut agent);
            if result.was_timed_out() {
                return Err(ReconfigurationError::AnalysisTimedOut);
            }

            failures = agent.failures;
            if !agent.did_update_failures {
                debug!("Found {} minimal failures", failures.len());
                return Ok(failures);
            }
        }
    }

    fn add_failure(&mut self, failure: &JobSequence) {
        if self
            .failures
            .iter()
            .any(|known| known.is_prefix_of(failure, false))
        {
            return;
        }

        self.failures
            .retain(|known| !failure.is_prefix_of(known, true));
        self.failures.push(failure.clone());
        self.did_update_failures = true;
    }

    fn failed_node(&mut self, node: &mut ScheduleNode<FailureSearchAttachment>) {
        if node.attachment().has_missed_deadline {
            return;
        }

        node.attachment_mut().has_missed_deadline = true;
        self.add_failure(&node.attachment().job_sequence);
    }
}

impl Agent for FailureSearchAgent {
    type Attachment = FailureSearchAttachment;

    fn create_next_node_attachment(
        &mut self,
        parent: &ScheduleNode<FailureSearchAttachment>,
        next_job: &Job,
    ) -> FailureSearchAttachment {
        FailureSearchAttachment {
            job_sequence: parent.attachment().job_sequence.extended_copy(next_job.index()),
            has_missed_deadline: parent.attachment().has_missed_deadline,
        }
    }

    fn merge_node_attachments(
        &mut self,
        destination: &mut ScheduleNode<FailureSearchAttachment>,
        parent: &ScheduleNode<FailureSearchAttachment>,
        next_job: &Job,
    ) {
        let extended = parent.attachment().job_sequence.extended_copy(next_job.index());
        destination.attachment_mut().job_sequence.merge(&extended);
    }

    fn missed_deadline(
        &mut self,
        node: &mut ScheduleNode<FailureSearchAttachment>,
        _late_job: &Job,
    ) {
        self.failed_node(node);
    }

    fn encountered_dead_end(&mut self, node: &mut ScheduleNode<FailureSearchAttachment>) {
        self.failed_node(node);
    }

    fn allow_merge(
        &self,
        parent: &ScheduleNode<FailureSearchAttachment>,
        _taken_job: &Job,
        destination: &ScheduleNode<FailureSearchAttachment>,
    ) -> bool {
        parent.attachment().has_missed_deadline == destination.attachment().has_missed_deadline
    }
}
