use log::trace;

use super::Agent;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::JobIndex;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::RatingGraphCut;
use crate::reconfiguration::ReconfigurationOptions;
use crate::reconfiguration::SubGraphNodeId;

/// The verdict of replaying a cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutCheckOutcome {
    /// No forbidden job could be dispatched at the point of choice.
    NotExercised,
    /// A forbidden job was dispatched at the point of choice.
    Exercised,
    /// A deadline was missed within the scope of the cut, or the pass was aborted.
    UnexpectedFailure,
}

/// Where a node lies relative to the cut being checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutCheckPosition {
    Prefix(SubGraphNodeId),
    /// One job has been dispatched after the point of choice.
    AfterBranch,
    OutOfScope,
}

impl Default for CutCheckPosition {
    fn default() -> Self {
        CutCheckPosition::Prefix(SubGraphNodeId::ROOT)
    }
}

/// Replays the prefix of a cut and reports whether one of its forbidden jobs can still be
/// dispatched at the point of choice.
#[derive(Debug)]
pub struct CutCheckAgent<'cut> {
    cut: &'cut RatingGraphCut,
    did_take_cut_edge: bool,
    has_unexpected_failure: bool,
}

impl<'cut> CutCheckAgent<'cut> {
    pub fn check(
        problem: &SchedulingProblem,
        cut: &'cut RatingGraphCut,
        options: &ReconfigurationOptions,
    ) -> CutCheckOutcome {
        let mut agent = CutCheckAgent {
            cut,
            did_take_cut_edge: false,
            has_unexpected_failure: false,
        };

        let result = explore(
            problem,
            options.exploration_options().with_early_exit(false),
            &mut agent,
        );

        if agent.did_take_cut_edge {
            CutCheckOutcome::Exercised
        } else if agent.has_unexpected_failure || result.was_timed_out() {
            CutCheckOutcome::UnexpectedFailure
        } else {
            CutCheckOutcome::NotExercised
        }
    }

    fn observe_transition(&mut self, parent: CutCheckPosition, job: &Job) {
        if let CutCheckPosition::Prefix(node) = parent {
            if self.cut.previous_jobs.is_leaf(node) && self.cut.is_forbidden(job.index()) {
                trace!("Forbidden job {} was dispatched", job.id());
                self.did_take_cut_edge = true;
            }
        }
    }

    fn successor_position(&self, parent: CutCheckPosition, job: JobIndex) -> CutCheckPosition {
        match parent {
            CutCheckPosition::Prefix(node) if self.cut.previous_jobs.is_leaf(node) => {
                if self.cut.is_forbidden(job) {
                    CutCheckPosition::OutOfScope
                } else {
                    CutCheckPosition::AfterBranch
                }
            }
            CutCheckPosition::Prefix(node) => self
                .cut
                .previous_jobs
                .can_take_job(node, job)
                .map_or(CutCheckPosition::OutOfScope, CutCheckPosition::Prefix),
            CutCheckPosition::AfterBranch | CutCheckPosition::OutOfScope => {
                CutCheckPosition::OutOfScope
            }
        }
    }
}

impl Agent for CutCheckAgent<'_> {
    type Attachment = CutCheckPosition;

    fn create_next_node_attachment(
        &mut self,
        parent: &ScheduleNode<CutCheckPosition>,
        next_job: &Job,
    ) -> CutCheckPosition {
        self.observe_transition(*parent.attachment(), next_job);
        self.successor_position(*parent.attachment(), next_job.index())
    }

    fn merge_node_attachments(
        &mut self,
        _destination: &mut ScheduleNode<CutCheckPosition>,
        parent: &ScheduleNode<CutCheckPosition>,
        next_job: &Job,
    ) {
        self.observe_transition(*parent.attachment(), next_job);
    }

    fn missed_deadline(&mut self, node: &mut ScheduleNode<CutCheckPosition>, _late_job: &Job) {
        if !self.did_take_cut_edge && *node.attachment() != CutCheckPosition::OutOfScope {
            self.has_unexpected_failure = true;
        }
    }

    fn encountered_dead_end(&mut self, node: &mut ScheduleNode<CutCheckPosition>) {
        if !self.did_take_cut_edge && *node.attachment() != CutCheckPosition::OutOfScope {
            self.has_unexpected_failure = true;
        }
    }

    fn is_allowed(&mut self, node: &ScheduleNode<CutCheckPosition>, next_job: &Job) -> bool {
        if self.did_take_cut_edge {
            return false;
        }

        match *node.attachment() {
            CutCheckPosition::OutOfScope => false,
            CutCheckPosition::AfterBranch => true,
            CutCheckPosition::Prefix(node) => {
                self.cut.previous_jobs.is_leaf(node)
                    || self
                        .cut
                        .previous_jobs
                        .can_take_job(node, next_job.index())
                        .is_some()
            }
        }
    }

    fn allow_merge(
        &self,
        parent: &ScheduleNode<CutCheckPosition>,
        taken_job: &Job,
        destination: &ScheduleNode<CutCheckPosition>,
    ) -> bool {
        self.successor_position(*parent.attachment(), taken_job.index()) == *destination.attachment()
    }

    fn may_potentially_forbid_jobs(&self) -> bool {
        true
    }
}
